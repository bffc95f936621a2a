use crate::config::Config;
use crate::display::ScopePanel;
use crate::frame::{Frame, BUFFER_SIZE};
use crate::reader::FrameReader;
use crate::report;
use crate::stats::{FrameStats, SessionStats, StatsCollector};
use crate::{Error, Result};
use log::{error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Why the receive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed the stream mid-frame
    PeerClosed,
    /// A read, decode, or display error ended the session
    ReadError,
    /// The user interrupted the session between iterations
    Interrupted,
}

/// Progress events reported while a session runs.
///
/// Events let library embedders observe the session without touching the
/// console output.
///
/// # Examples
///
/// ```no_run
/// use streamscope::{Config, ScopeClient, ScopeEvent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default().with_plot(false);
///
/// let client = ScopeClient::new(config).with_callback(|event: ScopeEvent| {
///     if let ScopeEvent::FrameReceived { mib_per_sec, .. } = event {
///         eprintln!("{mib_per_sec:.2} MB/s");
///     }
/// });
///
/// client.run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum ScopeEvent {
    /// The connection is up and the greeting has been sent.
    Connected,
    /// One full frame was received, decoded, and displayed.
    FrameReceived {
        index: u64,
        bytes: usize,
        elapsed: Duration,
        mib_per_sec: f64,
    },
    /// The session ended and the connection is closed.
    Closed { reason: CloseReason },
}

/// Callback for receiving [`ScopeEvent`]s.
///
/// Implemented for any `Fn(ScopeEvent)` that is `Send + Sync`.
pub trait EventCallback: Send + Sync {
    fn on_event(&self, event: ScopeEvent);
}

impl<F> EventCallback for F
where
    F: Fn(ScopeEvent) + Send + Sync,
{
    fn on_event(&self, event: ScopeEvent) {
        self(event)
    }
}

type CallbackRef = Arc<dyn EventCallback>;

/// A single-run streaming session.
///
/// The client connects once, reads frames until the peer closes, an error
/// occurs, or the user interrupts, then cleans up and reports. There is no
/// retry and no reconnection.
///
/// # Examples
///
/// ```no_run
/// use streamscope::{Config, ScopeClient};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new("192.168.4.1".to_string(), 80);
/// let client = ScopeClient::new(config);
///
/// client.run().await?;
///
/// let totals = client.get_stats();
/// println!("{} frames, {:.2} MB/s", totals.frames, totals.mib_per_sec());
/// # Ok(())
/// # }
/// ```
pub struct ScopeClient {
    config: Config,
    stats: StatsCollector,
    callback: Option<CallbackRef>,
    cancellation_token: CancellationToken,
}

impl ScopeClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: StatsCollector::new(),
            callback: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Attaches an event callback.
    ///
    /// Returns `self` for method chaining.
    pub fn with_callback<C: EventCallback + 'static>(mut self, callback: C) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// The token that interrupts the session.
    ///
    /// Cancellation is observed between iterations, never mid-read.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    /// Snapshot of the session totals collected so far.
    pub fn get_stats(&self) -> SessionStats {
        self.stats.get()
    }

    fn notify(&self, event: ScopeEvent) {
        if let Some(callback) = &self.callback {
            callback.on_event(event);
        }
    }

    /// Connects and runs the receive loop to completion.
    ///
    /// A failed connection attempt returns [`Error::Connect`] before any
    /// frame is read. Once the loop is entered, every termination cause
    /// (peer close, read error, interrupt) is logged and funneled into the
    /// same cleanup path, and `run` returns `Ok(())`.
    pub async fn run(&self) -> Result<()> {
        let mut reader = FrameReader::connect(&self.config).await?;
        self.notify(ScopeEvent::Connected);
        println!(
            "Connected to {}. Waiting for {} samples per frame...",
            self.config.endpoint(),
            BUFFER_SIZE
        );

        let mut panel = self
            .config
            .plot
            .then(|| ScopePanel::stdout(self.config.plot_width, self.config.plot_height));

        let mut index = 0u64;
        let reason = loop {
            if self.cancellation_token.is_cancelled() {
                info!("Stopped by user");
                break CloseReason::Interrupted;
            }

            let started = Instant::now();
            let bytes = match reader.read_frame().await {
                Ok(bytes) => bytes,
                Err(Error::ConnectionClosed { received, expected }) => {
                    info!("Connection closed by peer ({received} of {expected} bytes into a frame)");
                    break CloseReason::PeerClosed;
                }
                Err(e) => {
                    error!("Read failed: {e}");
                    break CloseReason::ReadError;
                }
            };
            let elapsed = started.elapsed();

            let frame = match Frame::decode(&bytes) {
                Ok(frame) => frame,
                Err(e) => {
                    error!("Decode failed: {e}");
                    break CloseReason::ReadError;
                }
            };

            let stats = FrameStats {
                index,
                bytes: bytes.len(),
                elapsed,
            };
            let block = report::frame_report(&stats, &frame);

            let shown = match panel.as_mut() {
                Some(panel) => panel.update(&frame, &block),
                None => {
                    println!("{block}");
                    Ok(())
                }
            };
            if let Err(e) = shown {
                error!("Display update failed: {e}");
                break CloseReason::ReadError;
            }

            self.stats.record_frame(&stats, frame.min(), frame.max());
            self.notify(ScopeEvent::FrameReceived {
                index,
                bytes: stats.bytes,
                elapsed,
                mib_per_sec: stats.mib_per_sec(),
            });
            index += 1;
        };

        // Close the socket before reporting; the plot stays visible.
        drop(reader);
        if let Some(panel) = panel {
            let _ = panel.finish();
        }
        info!("Connection closed");
        self.notify(ScopeEvent::Closed { reason });

        Ok(())
    }
}
