//! Site Driver Library
//!
//! Serves a CRUD API for static sites, each backed by a Pulumi stack that is
//! created, configured, updated and torn down through Pulumi Deployments.

pub mod app;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod server;
pub mod sites;
pub mod state;
pub mod utils;
