//! Data models used throughout the application
//!
//! Wire types for the daemon's JSON-RPC protocol and the relay's request bodies.

// JSON-RPC protocol data structures
pub mod jsonrpc;
