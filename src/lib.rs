//! wirehttp - HTTP/1.1 straight off the TCP socket
//!
//! Core library: incremental request parsing, phased response writing,
//! and a task-per-connection server.

pub mod config;
pub mod http;
pub mod server;
