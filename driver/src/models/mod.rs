//! Domain models

pub mod scope;
