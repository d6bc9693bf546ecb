// Export modules for the binary and the integration tests
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod relay;
pub mod rpc;
