//! Message extraction from a request body
//!
//! A body of the form `a=1&text=Hello+World` yields the decoded `text`
//! field. A body without a `text` field is taken verbatim, trimmed.
//!
//! Decoding follows the full `application/x-www-form-urlencoded` rules on
//! purpose. The `text` field is found in any position, and every `%XX`
//! escape is decoded, not only `%20`, `%0A` and `%0D`. Clients that send
//! `text=` first with only those escapes get the same result either way.

use heapless::{String, Vec};

use crate::request::{RequestError, MAX_REQUEST_SIZE};

/// Longest message that can be displayed or stored
pub const MAX_MESSAGE_LEN: usize = MAX_REQUEST_SIZE;

/// Text posted by a client
pub type Message = String<MAX_MESSAGE_LEN>;

/// Extract the message to display from a request body
///
/// An empty result means "nothing to show"; the caller answers 400.
pub fn extract_message(body: &[u8]) -> Result<Message, RequestError> {
    for field in body.split(|&b| b == b'&') {
        let (key, value) = match field.iter().position(|&b| b == b'=') {
            Some(eq) => (&field[..eq], &field[eq + 1..]),
            None => continue,
        };
        if decode_component(key)?.as_str() == "text" {
            return decode_component(value);
        }
    }

    let raw = core::str::from_utf8(body).map_err(|_| RequestError::Malformed)?;
    let mut message = String::new();
    // body fits, it came from a request buffer of the same capacity
    let _ = message.push_str(raw.trim());
    Ok(message)
}

/// Decode one `application/x-www-form-urlencoded` component
///
/// `+` becomes a space and `%XX` the byte it encodes; carriage returns are
/// dropped so CRLF line breaks come out as `\n`. A `%` not followed by two
/// hex digits is kept as-is.
pub fn decode_component(raw: &[u8]) -> Result<Message, RequestError> {
    let mut bytes: Vec<u8, MAX_MESSAGE_LEN> = Vec::new();
    let mut i = 0;

    while i < raw.len() {
        let byte = match raw[i] {
            b'+' => b' ',
            b'%' => match (raw.get(i + 1), raw.get(i + 2)) {
                (Some(&hi), Some(&lo)) => match (hex_value(hi), hex_value(lo)) {
                    (Some(hi), Some(lo)) => {
                        i += 2;
                        (hi << 4) | lo
                    }
                    _ => b'%',
                },
                _ => b'%',
            },
            other => other,
        };
        i += 1;

        if byte != b'\r' {
            // decoding never grows the input
            let _ = bytes.push(byte);
        }
    }

    String::from_utf8(bytes).map_err(|_| RequestError::Malformed)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
