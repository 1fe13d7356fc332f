//! Stack state

pub mod export;
