use crate::http::headers::Headers;

/// The first line of an HTTP request.
///
/// The version is stored without the `HTTP/` prefix, so a well-formed
/// request always carries `"1.1"` here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub request_target: String,
    pub http_version: String,
}

/// A fully parsed HTTP request.
///
/// Produced by [`read_request`](crate::http::parser::read_request) once the
/// parser reaches its terminal state; immutable from then on.
#[derive(Debug, Clone)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Returns the declared Content-Length, or 0 if absent or unparseable.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
