//! Static sites backed by stacks

pub mod controller;
pub mod lifecycle;
pub mod status;
