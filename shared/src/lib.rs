/// Shared types, capability contract, and configuration for Channel Scout.
pub mod config;
pub mod errors;
pub mod fetch;
pub mod models;
