//! Console report formatting.
//!
//! Formatting lives apart from the receive loop so it can be unit tested
//! without any I/O.

use crate::frame::Frame;
use crate::stats::{FrameStats, SessionStats};

/// Number of samples echoed from each end of a frame.
pub const EDGE_SAMPLES: usize = 10;

/// The per-frame headline: transfer count, sample count, elapsed seconds and
/// throughput.
pub fn frame_line(stats: &FrameStats, samples: usize) -> String {
    format!(
        "[{:4}] Received {} samples in {:.3}s ({:.2} MB/s)",
        stats.index,
        samples,
        stats.elapsed.as_secs_f64(),
        stats.mib_per_sec()
    )
}

fn values_line(label: &str, values: &[u16]) -> String {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{label}: [{joined}]")
}

/// The full per-frame report block, one string with a fixed line count.
pub fn frame_report(stats: &FrameStats, frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(&frame_line(stats, frame.samples().len()));
    out.push('\n');
    out.push_str(&values_line(
        "First 10 values",
        frame.first(EDGE_SAMPLES),
    ));
    out.push('\n');
    out.push_str(&values_line("Last 10 values", frame.last(EDGE_SAMPLES)));
    out.push_str("\n-----");
    out
}

/// End-of-session summary.
pub fn session_summary(stats: &SessionStats) -> String {
    let range = match (stats.min_sample, stats.max_sample) {
        (Some(min), Some(max)) => format!(", sample range {min}..{max}"),
        _ => String::new(),
    };
    format!(
        "Session: {} frames, {} bytes in {:.3}s ({:.2} MB/s){}",
        stats.frames,
        stats.total_bytes,
        stats.total_elapsed.as_secs_f64(),
        stats.mib_per_sec(),
        range
    )
}
