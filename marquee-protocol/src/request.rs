//! Incremental HTTP request reader
//!
//! Bytes arrive in whatever chunks the socket hands out. The reader
//! buffers them until the header block ends (`\r\n\r\n`), parses the
//! request line and `Content-Length`, then waits for the body.
//!
//! The buffer holds at most [`MAX_REQUEST_SIZE`] bytes. A header block that
//! does not fit is rejected; a body that does not fit is cut at capacity.

use heapless::{String, Vec};

/// Capacity of the request buffer, header block included
pub const MAX_REQUEST_SIZE: usize = 1024;

/// Longest request path kept; longer paths are truncated
pub const MAX_PATH_LEN: usize = 64;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// Errors from reading a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Header block exceeds the buffer capacity
    TooLarge,
    /// Unparseable request line or header
    Malformed,
}

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Post,
    /// Anything else; always routed to "not found"
    Other,
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Where a request goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// `POST /display`
    Display,
    /// Everything else
    NotFound,
}

/// A complete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path without the query string
    pub path: String<MAX_PATH_LEN>,
    pub body: Vec<u8, MAX_REQUEST_SIZE>,
}

impl Request {
    /// Route for this request; the path must match exactly
    pub fn route(&self) -> Route {
        if self.method == Method::Post && self.path.as_str() == "/display" {
            Route::Display
        } else {
            Route::NotFound
        }
    }
}

/// Parsed header block
#[derive(Debug, Clone)]
struct Head {
    method: Method,
    path: String<MAX_PATH_LEN>,
    body_start: usize,
    content_length: Option<usize>,
}

/// Accumulates bytes into a [`Request`]
#[derive(Debug, Clone, Default)]
pub struct RequestReader {
    buffer: Vec<u8, MAX_REQUEST_SIZE>,
    head: Option<Head>,
}

impl RequestReader {
    /// Create an empty reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any buffered bytes
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.head = None;
    }

    /// Bytes buffered so far
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a chunk of received bytes
    ///
    /// Returns `Ok(Some(request))` once the request is complete and
    /// `Ok(None)` while more bytes are needed. Bytes past the buffer
    /// capacity are dropped. The reader resets after a request or error.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Option<Request>, RequestError> {
        let scan_from = self.buffer.len().saturating_sub(HEADER_END.len() - 1);
        let room = MAX_REQUEST_SIZE - self.buffer.len();
        let take = bytes.len().min(room);
        // cannot fail, `take` fits
        let _ = self.buffer.extend_from_slice(&bytes[..take]);

        if self.head.is_none() {
            match find(&self.buffer[scan_from..], HEADER_END) {
                Some(pos) => {
                    let end = scan_from + pos;
                    match parse_head(&self.buffer[..end], end + HEADER_END.len()) {
                        Ok(head) => self.head = Some(head),
                        Err(e) => {
                            self.reset();
                            return Err(e);
                        }
                    }
                }
                None if self.buffer.is_full() => {
                    self.reset();
                    return Err(RequestError::TooLarge);
                }
                None => return Ok(None),
            }
        }

        if self.body_complete() {
            Ok(self.take_request())
        } else {
            Ok(None)
        }
    }

    /// Complete the request at end of stream
    ///
    /// Used when the peer stops sending before `Content-Length` is reached;
    /// the request is returned with the body received so far.
    pub fn finish(&mut self) -> Result<Request, RequestError> {
        match self.take_request() {
            Some(request) => Ok(request),
            None => {
                self.reset();
                Err(RequestError::Malformed)
            }
        }
    }

    fn body_complete(&self) -> bool {
        let Some(head) = &self.head else {
            return false;
        };
        if self.buffer.is_full() {
            return true;
        }
        match head.content_length {
            Some(length) => self.buffer.len() - head.body_start >= length,
            None => true,
        }
    }

    fn take_request(&mut self) -> Option<Request> {
        let head = self.head.take()?;
        let mut body_end = self.buffer.len();
        if let Some(length) = head.content_length {
            body_end = body_end.min(head.body_start + length);
        }

        let mut body = Vec::new();
        let _ = body.extend_from_slice(&self.buffer[head.body_start..body_end]);
        self.reset();

        Some(Request {
            method: head.method,
            path: head.path,
            body,
        })
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn parse_head(head: &[u8], body_start: usize) -> Result<Head, RequestError> {
    let text = core::str::from_utf8(head).map_err(|_| RequestError::Malformed)?;
    let mut lines = text.split("\r\n");

    let request_line = lines.next().ok_or(RequestError::Malformed)?;
    let mut parts = request_line.split(' ');
    let method = parts.next().filter(|m| !m.is_empty());
    let target = parts.next().filter(|t| !t.is_empty());
    let (Some(method), Some(target)) = (method, target) else {
        return Err(RequestError::Malformed);
    };

    let target = target.split('?').next().unwrap_or(target);
    let mut path = String::new();
    for c in target.chars() {
        if path.push(c).is_err() {
            break;
        }
    }

    let mut content_length = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            let length = value
                .trim()
                .parse::<usize>()
                .map_err(|_| RequestError::Malformed)?;
            content_length = Some(length);
        }
    }

    Ok(Head {
        method: Method::parse(method),
        path,
        body_start,
        content_length,
    })
}
