//! Core sf library (config, persisted stores, login flow).

pub mod accounts;
pub mod aliases;
pub mod config;
pub mod environments;
pub mod login;
pub mod store;
