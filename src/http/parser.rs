use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::headers::{Headers, find_crlf};
use crate::http::request::{Request, RequestLine};

const INITIAL_BUFFER_SIZE: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("request line must have 3 parts, got {0}")]
    RequestLineParts(usize),
    #[error("request line is not valid UTF-8")]
    RequestLineEncoding,
    #[error("invalid HTTP version format: {0}")]
    InvalidVersionFormat(String),
    #[error("invalid HTTP version: {0}, only 1.1 is supported")]
    UnsupportedVersion(String),
    #[error("invalid method: {0}")]
    InvalidMethod(String),
    #[error("invalid header format: missing colon")]
    HeaderMissingColon,
    #[error("invalid header format: space before colon")]
    HeaderSpaceBeforeColon,
    #[error("invalid header format: space in key")]
    HeaderSpaceInKey,
    #[error("invalid header format: invalid key")]
    InvalidHeaderKey,
    #[error("invalid header format: value is not valid UTF-8")]
    InvalidHeaderValue,
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("received more body data than Content-Length specified")]
    BodyOverrun,
    #[error("connection closed before request was fully parsed")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    RequestLine,
    Headers,
    Body,
    Done,
}

/// Incremental request parser.
///
/// Fed arbitrary slices of the inbound byte stream via [`parse`](Self::parse);
/// a return of 0 consumed bytes means "need more input". Once
/// [`is_done`](Self::is_done) reports true the accumulated message can be
/// taken with [`into_request`](Self::into_request).
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::RequestLine,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Consumes the parser, yielding the completed request.
    ///
    /// Must only be called once [`is_done`](Self::is_done) is true.
    pub fn into_request(self) -> Request {
        debug_assert!(self.is_done());
        Request {
            request_line: self.request_line.unwrap_or_default(),
            headers: self.headers,
            body: self.body,
        }
    }

    /// Advances the state machine as far as `data` allows.
    ///
    /// Returns the number of bytes consumed; the caller must drop them from
    /// the front of its buffer before the next call. Consuming 0 bytes means
    /// more input is required.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let mut consumed = 0;

        loop {
            match self.state {
                ParseState::RequestLine => {
                    let Some((request_line, n)) = parse_request_line(&data[consumed..])? else {
                        return Ok(consumed);
                    };
                    self.request_line = Some(request_line);
                    consumed += n;
                    self.state = ParseState::Headers;
                }

                ParseState::Headers => {
                    let (n, done) = self.headers.parse(&data[consumed..])?;
                    if n == 0 {
                        return Ok(consumed);
                    }
                    consumed += n;
                    if done {
                        self.state = ParseState::Body;
                    } else {
                        return Ok(consumed);
                    }
                }

                ParseState::Body => {
                    let Some(content_length_str) = self.headers.get("Content-Length") else {
                        self.state = ParseState::Done;
                        continue;
                    };

                    let content_length: usize = content_length_str.parse().map_err(|_| {
                        ParseError::InvalidContentLength(content_length_str.to_string())
                    })?;

                    if content_length == 0 {
                        self.state = ParseState::Done;
                        continue;
                    }

                    let bytes_needed = content_length.saturating_sub(self.body.len());
                    let bytes_available = data.len() - consumed;
                    let bytes_to_consume = bytes_needed.min(bytes_available);

                    if bytes_to_consume > 0 {
                        self.body
                            .extend_from_slice(&data[consumed..consumed + bytes_to_consume]);
                        consumed += bytes_to_consume;
                    }

                    if self.body.len() == content_length {
                        self.state = ParseState::Done;
                    } else if self.body.len() > content_length {
                        return Err(ParseError::BodyOverrun);
                    } else {
                        return Ok(consumed);
                    }
                }

                ParseState::Done => {
                    return Ok(consumed);
                }
            }
        }
    }
}

/// Reads one complete request from `reader`.
///
/// Correct under arbitrary read-chunk boundaries: the buffer starts small,
/// doubles whenever it fills up, and unconsumed bytes are compacted to the
/// front after every parse step. End-of-stream before the request is
/// complete is fatal.
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Request, ParseError> {
    let mut buf = vec![0u8; INITIAL_BUFFER_SIZE];
    let mut filled = 0;
    let mut parser = RequestParser::new();

    while !parser.is_done() {
        if filled == buf.len() {
            buf.resize(buf.len() * 2, 0);
        }

        let n = reader.read(&mut buf[filled..]).await?;
        filled += n;

        // Drain everything the buffer holds before reading again.
        loop {
            let consumed = parser.parse(&buf[..filled])?;
            if consumed == 0 {
                break;
            }

            buf.copy_within(consumed..filled, 0);
            filled -= consumed;

            if parser.is_done() {
                break;
            }
        }

        if n == 0 {
            if !parser.is_done() {
                return Err(ParseError::UnexpectedEof);
            }
            break;
        }
    }

    Ok(parser.into_request())
}

fn is_valid_method(method: &str) -> bool {
    !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase())
}

/// Parses the request line from the front of `data`.
///
/// Returns `None` when no complete CRLF-terminated line is available yet;
/// otherwise the parsed line and the bytes consumed including the CRLF.
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(crlf_index) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..crlf_index])
        .map_err(|_| ParseError::RequestLineEncoding)?;
    let bytes_consumed = crlf_index + 2;

    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(ParseError::RequestLineParts(parts.len()));
    }
    let (method, target, version_part) = (parts[0], parts[1], parts[2]);

    let version = match version_part.split_once('/') {
        Some(("HTTP", version)) => version,
        _ => return Err(ParseError::InvalidVersionFormat(version_part.to_string())),
    };
    if version != "1.1" {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    if !is_valid_method(method) {
        return Err(ParseError::InvalidMethod(method.to_string()));
    }

    let request_line = RequestLine {
        method: method.to_string(),
        request_target: target.to_string(),
        http_version: version.to_string(),
    };

    Ok(Some((request_line, bytes_consumed)))
}
