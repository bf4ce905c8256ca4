//! Marquee HTTP endpoint protocol
//!
//! Just enough HTTP/1.1 for one endpoint: a client posts text to
//! `/display` and gets a short plain-text answer. One request per
//! connection, the server closes after responding.
//!
//! ```text
//! POST /display HTTP/1.1\r\n
//! Content-Type: application/x-www-form-urlencoded\r\n
//! Content-Length: 16\r\n
//! \r\n
//! text=Hello+World
//! ```
//!
//! Requests are bounded by [`MAX_REQUEST_SIZE`]; everything lives in
//! fixed-capacity `heapless` buffers.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod form;
pub mod request;
pub mod response;

pub use form::{decode_component, extract_message, Message, MAX_MESSAGE_LEN};
pub use request::{
    Method, Request, RequestError, RequestReader, Route, MAX_PATH_LEN, MAX_REQUEST_SIZE,
};
pub use response::{EncodeError, Response, Status, MAX_RESPONSE_SIZE};
