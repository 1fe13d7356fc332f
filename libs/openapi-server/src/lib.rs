//! Site API models
//!
//! Request and response bodies for the `/sites` CRUD surface.

pub mod models;
