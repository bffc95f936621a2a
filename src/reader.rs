//! Transport side of a session: one exclusively-owned stream, read in
//! exact frame-sized units.

use crate::config::Config;
use crate::frame::{GREETING, PACKET_SIZE};
use crate::{Error, Result};
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default cap on how many bytes a single receive call may request.
pub const RECV_CHUNK: usize = 4096;

/// Reads fixed-size frames from a stream.
///
/// The reader owns the stream for the lifetime of the session. Dropping the
/// reader closes the connection.
pub struct FrameReader<S> {
    stream: S,
    recv_chunk: usize,
}

impl<S> FrameReader<S> {
    /// Wraps an already-connected stream.
    ///
    /// `recv_chunk` bounds each individual receive call and is clamped to
    /// `1..=PACKET_SIZE`.
    pub fn from_stream(stream: S, recv_chunk: usize) -> Self {
        Self {
            stream,
            recv_chunk: recv_chunk.clamp(1, PACKET_SIZE),
        }
    }

    /// Consumes the reader and returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl FrameReader<TcpStream> {
    /// Connects to the configured endpoint and sends the one-shot greeting.
    ///
    /// The connection attempt is bounded by `config.connect_timeout`; a
    /// refusal or an expired timeout fails with [`Error::Connect`]. After the
    /// greeting the client never writes again.
    pub async fn connect(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint();

        let stream = match timeout(config.connect_timeout, TcpStream::connect(&endpoint)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(Error::Connect(format!("{endpoint}: {e}"))),
            Err(_) => {
                return Err(Error::Connect(format!(
                    "{endpoint}: no connection within {:.1}s",
                    config.connect_timeout.as_secs_f64()
                )))
            }
        };
        info!("Connected to {endpoint}");

        let mut reader = Self::from_stream(stream, config.recv_chunk);
        reader.stream.write_all(GREETING).await?;
        reader.stream.flush().await?;
        debug!("Sent {}-byte greeting", GREETING.len());

        Ok(reader)
    }
}

impl<S: AsyncRead + Unpin> FrameReader<S> {
    /// Reads exactly [`PACKET_SIZE`] bytes, accumulating across however many
    /// partial reads the stream delivers.
    ///
    /// End-of-stream before the full count fails with
    /// [`Error::ConnectionClosed`]; a short buffer is never returned. Any
    /// other read error propagates as-is.
    pub async fn read_frame(&mut self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; PACKET_SIZE];
        let mut received = 0usize;

        while received < PACKET_SIZE {
            let want = (PACKET_SIZE - received).min(self.recv_chunk);
            let n = self.stream.read(&mut buf[received..received + want]).await?;
            if n == 0 {
                return Err(Error::ConnectionClosed {
                    received,
                    expected: PACKET_SIZE,
                });
            }
            received += n;
        }

        Ok(buf)
    }
}
