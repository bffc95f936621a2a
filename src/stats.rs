use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Timing for one completed frame transfer.
///
/// Recomputed fresh for every iteration; nothing here persists between
/// frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameStats {
    /// Zero-based transfer count within the session
    pub index: u64,
    /// Bytes moved for this frame
    pub bytes: usize,
    /// Wall-clock time from read start to the full frame
    pub elapsed: Duration,
}

impl FrameStats {
    /// Throughput for this transfer in MB/s (1 MB = 1048576 bytes).
    ///
    /// # Examples
    ///
    /// ```
    /// use streamscope::stats::FrameStats;
    /// use std::time::Duration;
    ///
    /// let stats = FrameStats {
    ///     index: 0,
    ///     bytes: 32768,
    ///     elapsed: Duration::from_secs(1),
    /// };
    /// assert_eq!(stats.mib_per_sec(), 0.03125);
    /// ```
    pub fn mib_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.bytes as f64 / BYTES_PER_MIB) / secs
        } else {
            0.0
        }
    }
}

/// Accumulated totals for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub total_bytes: u64,
    pub total_elapsed: Duration,
    pub min_sample: Option<u16>,
    pub max_sample: Option<u16>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            total_bytes: 0,
            total_elapsed: Duration::ZERO,
            min_sample: None,
            max_sample: None,
        }
    }

    /// Average throughput across the session in MB/s.
    pub fn mib_per_sec(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.total_bytes as f64 / BYTES_PER_MIB) / secs
        } else {
            0.0
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle over the session totals.
#[derive(Debug, Clone)]
pub struct StatsCollector {
    inner: Arc<Mutex<SessionStats>>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionStats::new())),
        }
    }

    /// Folds one completed frame into the session totals.
    pub fn record_frame(&self, stats: &FrameStats, min_sample: u16, max_sample: u16) {
        let mut s = self.inner.lock();
        s.frames += 1;
        s.total_bytes += stats.bytes as u64;
        s.total_elapsed += stats.elapsed;
        s.min_sample = Some(s.min_sample.map_or(min_sample, |m| m.min(min_sample)));
        s.max_sample = Some(s.max_sample.map_or(max_sample, |m| m.max(max_sample)));
    }

    /// Snapshot of the current totals.
    pub fn get(&self) -> SessionStats {
        self.inner.lock().clone()
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
