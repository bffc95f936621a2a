//! streamscope - live viewer for fixed-frame TCP sample streams
//!
//! This library connects to a device that streams raw binary frames of
//! 16-bit samples over TCP, reads exact-size frames, renders a live terminal
//! line plot, and reports per-frame throughput.
//!
//! # Features
//!
//! - Exact-count frame reads, robust to arbitrary TCP fragmentation
//! - Live terminal line plot with fixed axes
//! - Per-frame and per-session throughput statistics
//! - Clean shutdown on interrupt, peer close, or read error
//! - Asynchronous I/O using tokio on a single thread

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod reader;
pub mod report;
pub mod stats;

pub use client::{CloseReason, EventCallback, ScopeClient, ScopeEvent};
pub use config::Config;
pub use display::ScopePanel;
pub use error::{Error, Result};
pub use frame::{Frame, BUFFER_SIZE, GREETING, PACKET_SIZE, SAMPLE_MAX};
pub use reader::{FrameReader, RECV_CHUNK};
pub use stats::{FrameStats, SessionStats, StatsCollector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
