//! Pulumi Cloud API models
//!
//! Request and response bodies for the stack, deployment and user endpoints
//! consumed by the site driver. Only the fields the driver reads or writes are
//! modeled; unknown fields are ignored on decode.

pub mod models;
