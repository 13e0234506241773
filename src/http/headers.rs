use std::collections::HashMap;

use crate::http::parser::ParseError;

/// HTTP header field map.
///
/// Keys are stored lower-cased, so lookups are case-insensitive. Repeated
/// fields are folded into a single value joined by `,` in the order they
/// were parsed. Iteration order is unspecified (the map is hash-backed),
/// so header order on the wire is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a header value by name, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Sets a header, replacing any existing value. The key is lower-cased.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into().to_ascii_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses at most one header line out of `data`.
    ///
    /// Returns `(bytes_consumed, done)`:
    /// - `(0, false)` when `data` holds no complete CRLF-terminated line yet;
    /// - `(2, true)` when the line is the blank terminator of the header block;
    /// - `(line_len + 2, false)` after storing one field.
    ///
    /// Errors consume nothing, so a malformed line is surfaced on every
    /// retry until the caller gives up on the connection.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(crlf_index) = find_crlf(data) else {
            return Ok((0, false));
        };

        if crlf_index == 0 {
            return Ok((2, true));
        }

        let header_line = &data[..crlf_index];
        let bytes_consumed = crlf_index + 2;

        let colon_index = header_line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::HeaderMissingColon)?;

        let key = &header_line[..colon_index];

        if key.ends_with(b" ") {
            return Err(ParseError::HeaderSpaceBeforeColon);
        }
        if key.contains(&b' ') {
            return Err(ParseError::HeaderSpaceInKey);
        }
        if !is_valid_header_key(key) {
            return Err(ParseError::InvalidHeaderKey);
        }

        // Token validation guarantees the key is ASCII.
        let lowercase_key = std::str::from_utf8(key)
            .map_err(|_| ParseError::InvalidHeaderKey)?
            .to_ascii_lowercase();
        let value = std::str::from_utf8(header_line[colon_index + 1..].trim_ascii())
            .map_err(|_| ParseError::InvalidHeaderValue)?;

        match self.map.get_mut(&lowercase_key) {
            Some(existing) => {
                existing.push(',');
                existing.push_str(value);
            }
            None => {
                self.map.insert(lowercase_key, value.to_string());
            }
        }

        Ok((bytes_consumed, false))
    }
}

pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}

// Token characters per RFC 9110 (5.6.2).
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

fn is_valid_header_key(key: &[u8]) -> bool {
    !key.is_empty() && key.iter().all(|&b| is_token_char(b))
}
