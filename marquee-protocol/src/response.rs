//! Response encoding
//!
//! Every response is plain text and closes the connection:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 28\r\n
//! Connection: close\r\n
//! \r\n
//! Text received and displayed.
//! ```

use core::fmt::Write;

use heapless::String;

/// Buffer size that fits every response this crate produces
pub const MAX_RESPONSE_SIZE: usize = 256;

/// Body of a successful post
pub const ACCEPTED_BODY: &str = "Text received and displayed.";

/// Body explaining how to use the endpoint
pub const USAGE_BODY: &str = "Send POST data to /display with 'text=YOUR_MESSAGE'.";

/// Body when the panel could not be updated
pub const DISPLAY_FAILED_BODY: &str = "Display update failed.";

/// Errors from encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer too small
    BufferTooSmall,
}

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    /// Numeric status code
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    /// Reason phrase
    pub const fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response with a static plain-text body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    pub status: Status,
    pub body: &'static str,
}

impl Response {
    /// 200, message shown and saved
    pub const fn accepted() -> Self {
        Self {
            status: Status::Ok,
            body: ACCEPTED_BODY,
        }
    }

    /// 400, nothing to show
    pub const fn empty_message() -> Self {
        Self {
            status: Status::BadRequest,
            body: USAGE_BODY,
        }
    }

    /// 400, request could not be read
    pub const fn malformed() -> Self {
        Self::empty_message()
    }

    /// 404, unknown route
    pub const fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            body: USAGE_BODY,
        }
    }

    /// 500, panel unreachable
    pub const fn display_failed() -> Self {
        Self {
            status: Status::InternalServerError,
            body: DISPLAY_FAILED_BODY,
        }
    }

    /// Encode into `buffer`
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let mut out: String<MAX_RESPONSE_SIZE> = String::new();
        write!(
            out,
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status.code(),
            self.status.reason(),
            self.body.len(),
            self.body,
        )
        .map_err(|_| EncodeError::BufferTooSmall)?;

        let target = buffer
            .get_mut(..out.len())
            .ok_or(EncodeError::BufferTooSmall)?;
        target.copy_from_slice(out.as_bytes());
        Ok(out.len())
    }
}
