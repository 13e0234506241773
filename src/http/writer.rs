use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("status line already written")]
    StatusAlreadyWritten,
    #[error("headers must be written after the status line")]
    HeadersOutOfOrder,
    #[error("body must be written after the headers")]
    BodyOutOfOrder,
    #[error("connection closed while writing")]
    ConnectionClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    StatusWritten,
    HeadersWritten,
    BodyWritten,
}

/// Serializes an HTTP response, enforcing the status → headers → body
/// write order.
///
/// Writes are staged into an internal buffer; [`flush_to`](Self::flush_to)
/// sends the staged bytes to the connection in one pass. Header output
/// order on the wire is unspecified.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: BytesMut,
    phase: Phase,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
            phase: Phase::NotStarted,
        }
    }

    /// Stages `HTTP/1.1 <code> <reason>\r\n`. Must be the first write.
    pub fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        if self.phase != Phase::NotStarted {
            return Err(WriteError::StatusAlreadyWritten);
        }

        let status_line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.buffer.extend_from_slice(status_line.as_bytes());
        self.phase = Phase::StatusWritten;
        Ok(())
    }

    /// Stages every header as `<key>: <value>\r\n` plus the blank line
    /// terminating the header block. Must follow the status line.
    pub fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        if self.phase != Phase::StatusWritten {
            return Err(WriteError::HeadersOutOfOrder);
        }

        for (key, value) in headers.iter() {
            self.buffer.extend_from_slice(key.as_bytes());
            self.buffer.extend_from_slice(b": ");
            self.buffer.extend_from_slice(value.as_bytes());
            self.buffer.extend_from_slice(b"\r\n");
        }
        self.buffer.extend_from_slice(b"\r\n");
        self.phase = Phase::HeadersWritten;
        Ok(())
    }

    /// Stages body bytes verbatim. Must follow the headers; repeated calls
    /// append. Returns the number of bytes written.
    pub fn write_body(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        match self.phase {
            Phase::HeadersWritten | Phase::BodyWritten => {
                self.buffer.extend_from_slice(data);
                self.phase = Phase::BodyWritten;
                Ok(data.len())
            }
            _ => Err(WriteError::BodyOutOfOrder),
        }
    }

    /// Bytes staged so far, in wire order.
    pub fn staged(&self) -> &[u8] {
        &self.buffer
    }

    /// Drains the staged response to `sink`, handling partial writes.
    pub async fn flush_to<W: AsyncWrite + Unpin>(&mut self, sink: &mut W) -> Result<(), WriteError> {
        while !self.buffer.is_empty() {
            let n = sink.write(&self.buffer).await?;

            if n == 0 {
                return Err(WriteError::ConnectionClosed);
            }

            let _ = self.buffer.split_to(n);
        }

        sink.flush().await?;
        Ok(())
    }
}
