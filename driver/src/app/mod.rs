//! Application wiring

pub mod commands;
pub mod options;
pub mod run;
