//! HTTP/1.1 protocol implementation over raw byte streams.
//!
//! No built-in HTTP abstraction is used anywhere: requests are reconstructed
//! incrementally from whatever chunk sizes the transport delivers, and
//! responses are serialized by hand.
//!
//! # Submodules
//!
//! - **`headers`**: header map and the single-line header parser
//! - **`parser`**: incremental request parser and the top-level read loop
//! - **`request`**: parsed request representation
//! - **`response`**: status codes and default response headers
//! - **`writer`**: phased response writer
//!
//! # Request parse states
//!
//! ```text
//! RequestLine ──► Headers ──► Body ──► Done
//!                               │        ▲
//!                               └────────┘ (no Content-Length, or 0)
//! ```
//!
//! Each state consumes what it can from the read buffer and reports
//! 0 bytes consumed when it needs more input, which is what lets the same
//! machine run correctly whether the peer sends the message in one write
//! or one byte at a time.
//!
//! Every connection carries exactly one exchange: parse a request, write a
//! response, close. Keep-alive is deliberately not supported.

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
