use crate::http::headers::Headers;

/// HTTP response status code.
///
/// A plain numeric code rather than a closed enum: the writer accepts any
/// code and falls back to an empty reason phrase for codes outside the
/// built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the standard reason phrase, or `""` for unknown codes.
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            500 => "Internal Server Error",
            _ => "",
        }
    }
}

/// Builds the baseline response headers for a plain-text body of the given
/// length: content-length, connection: close, content-type.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set("content-length", content_len.to_string());
    headers.set("connection", "close");
    headers.set("content-type", "text/plain");
    headers
}
