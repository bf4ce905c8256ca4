//! HTTP accept loop
//!
//! One connection at a time: read one request, hand it to the message
//! board, write the response, close.

use defmt::*;
use embassy_net::tcp::{self, TcpSocket};
use embassy_net::Stack;
use embassy_time::{Duration, Timer};
use embedded_io_async::Write;
use marquee_core::{MessageBoard, Outcome};
use marquee_display::DisplayBackend;
use marquee_hal::FlashStorage;
use marquee_protocol::{EncodeError, RequestReader, Response, MAX_RESPONSE_SIZE};

use crate::config;

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 512;

/// Pause after a failed connection before accepting again
const ERROR_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
enum ConnectionError {
    Tcp(tcp::Error),
    Encode(EncodeError),
}

impl From<tcp::Error> for ConnectionError {
    fn from(e: tcp::Error) -> Self {
        ConnectionError::Tcp(e)
    }
}

impl From<EncodeError> for ConnectionError {
    fn from(e: EncodeError) -> Self {
        ConnectionError::Encode(e)
    }
}

/// Serve `POST /display` forever
pub async fn serve<D, S>(stack: Stack<'static>, board: &mut MessageBoard<D, S>) -> !
where
    D: DisplayBackend,
    S: FlashStorage,
{
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    info!("Listening on port {}", config::SERVER_PORT);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_millis(config::READ_TIMEOUT_MS)));

        if let Err(e) = socket.accept(config::SERVER_PORT).await {
            warn!("Accept failed: {:?}", e);
            Timer::after(ERROR_BACKOFF).await;
            continue;
        }
        debug!("Connection from {:?}", socket.remote_endpoint());

        let result = handle_connection(&mut socket, board).await;

        socket.close();
        // push out the FIN before the socket is dropped
        let _ = socket.flush().await;

        if let Err(e) = result {
            warn!("Connection error: {:?}", e);
            Timer::after(ERROR_BACKOFF).await;
        }
    }
}

async fn handle_connection<D, S>(
    socket: &mut TcpSocket<'_>,
    board: &mut MessageBoard<D, S>,
) -> Result<(), ConnectionError>
where
    D: DisplayBackend,
    S: FlashStorage,
{
    let mut reader = RequestReader::new();
    let mut chunk = [0u8; 256];

    let request = loop {
        let n = socket.read(&mut chunk).await?;
        let result = if n == 0 {
            reader.finish().map(Some)
        } else {
            reader.feed(&chunk[..n])
        };

        match result {
            Ok(Some(request)) => break request,
            Ok(None) => continue,
            Err(e) => {
                warn!("Bad request: {:?}", e);
                return respond(socket, Response::malformed()).await;
            }
        }
    };

    let outcome = board.handle(&request).await;
    match outcome {
        Outcome::Displayed { saved: Ok(()) } => info!("Displayed: {}", board.current()),
        Outcome::Displayed { saved: Err(e) } => {
            warn!("Displayed but not saved: {:?}", e)
        }
        Outcome::DisplayFailed(e) => error!("Display update failed: {:?}", e),
        other => debug!("Request not handled: {:?}", other),
    }

    respond(socket, outcome.response()).await
}

async fn respond(socket: &mut TcpSocket<'_>, response: Response) -> Result<(), ConnectionError> {
    let mut buffer = [0u8; MAX_RESPONSE_SIZE];
    let len = response.encode(&mut buffer)?;
    socket.write_all(&buffer[..len]).await?;
    trace!("Sent {} {}", response.status.code(), response.status.reason());
    Ok(())
}
