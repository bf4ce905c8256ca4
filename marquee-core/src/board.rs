//! Message board service
//!
//! Turns one HTTP request into a display update and a saved message.
//! Transport and logging stay with the caller: it feeds the request in,
//! logs the [`Outcome`] and writes [`Outcome::response`] back.

use marquee_display::{DisplayBackend, DisplayError};
use marquee_hal::FlashStorage;
use marquee_protocol::{extract_message, Message, Request, RequestError, Response, Route};

use crate::message::{MessageStore, StoreError};
use crate::render;

/// What happened to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Message shown; `saved` reports whether it was persisted
    Displayed { saved: Result<(), StoreError> },
    /// Route matched but the message was empty
    EmptyMessage,
    /// Body could not be decoded
    Rejected(RequestError),
    /// Unknown method or path
    NotFound,
    /// Panel still failing after a re-init; nothing was saved
    DisplayFailed(DisplayError),
}

impl Outcome {
    /// Response to send back
    ///
    /// A message that was shown but not saved still answers 200: the
    /// client's text is on the panel.
    pub fn response(&self) -> Response {
        match self {
            Outcome::Displayed { .. } => Response::accepted(),
            Outcome::EmptyMessage => Response::empty_message(),
            Outcome::Rejected(_) => Response::malformed(),
            Outcome::NotFound => Response::not_found(),
            Outcome::DisplayFailed(_) => Response::display_failed(),
        }
    }
}

/// The display, the store and the message currently shown
pub struct MessageBoard<D, S> {
    display: D,
    store: MessageStore<S>,
    current: Message,
}

impl<D, S> MessageBoard<D, S>
where
    D: DisplayBackend,
    S: FlashStorage,
{
    /// Create a board showing `current` (not drawn until [`show_current`](Self::show_current))
    pub fn new(display: D, store: MessageStore<S>, current: Message) -> Self {
        Self {
            display,
            store,
            current,
        }
    }

    /// Create a board with the saved message, or `fallback` if none
    pub async fn restore(display: D, mut store: MessageStore<S>, fallback: &str) -> Self {
        let current = store.load_or(fallback).await;
        Self::new(display, store, current)
    }

    /// Message currently on the panel
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Redraw the current message
    pub fn show_current(&mut self) -> Result<(), DisplayError> {
        render::render_with_recovery(&mut self.display, &self.current)
    }

    /// Display access for status screens
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Handle one request
    pub async fn handle(&mut self, request: &Request) -> Outcome {
        if request.route() != Route::Display {
            return Outcome::NotFound;
        }

        let message = match extract_message(&request.body) {
            Ok(message) => message,
            Err(e) => return Outcome::Rejected(e),
        };
        if message.is_empty() {
            return Outcome::EmptyMessage;
        }

        if let Err(e) = render::render_with_recovery(&mut self.display, &message) {
            return Outcome::DisplayFailed(e);
        }

        let saved = self.store.save(&message).await;
        self.current = message;
        Outcome::Displayed { saved }
    }

    /// Consume the board
    pub fn into_parts(self) -> (D, MessageStore<S>) {
        (self.display, self.store)
    }
}
