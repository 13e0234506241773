//! Connection server.
//!
//! Accept loop, task-per-connection dispatch, and best-effort shutdown via
//! a single atomic flag. The only state shared across connections is that
//! flag; requests, buffers, and writers are owned by their connection's task.

pub mod listener;

pub use listener::{Handler, Server};
