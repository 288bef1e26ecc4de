//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod env;
pub mod functions;
pub mod generate;
