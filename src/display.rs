//! Terminal line plot for live frames.
//!
//! The panel draws into any [`Write`] sink with fixed axes: X spans the
//! sample index range `0..BUFFER_SIZE`, Y spans `0..=SAMPLE_MAX`. Every
//! update redraws the whole panel in place with ANSI cursor movement, so the
//! plot stays put while the session runs.

use crate::frame::{Frame, BUFFER_SIZE, SAMPLE_MAX};
use std::io::{self, Write};

const GUTTER: usize = 5;

/// An owned display handle for one session.
///
/// Created before the receive loop, updated once per frame, and torn down
/// with [`ScopePanel::finish`], which leaves the final plot visible.
pub struct ScopePanel<W: Write> {
    out: W,
    width: usize,
    height: usize,
    rows_drawn: usize,
}

impl ScopePanel<io::Stdout> {
    /// A panel writing to stdout.
    pub fn stdout(width: usize, height: usize) -> Self {
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> ScopePanel<W> {
    /// Creates a panel with the given plot area in terminal cells.
    ///
    /// Dimensions are clamped to a usable minimum (16 columns, 4 rows).
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(16),
            height: height.max(4),
            rows_drawn: 0,
        }
    }

    /// Redraws the plot for `frame` and the report block below it.
    ///
    /// The redraw is synchronous; when this returns the sink has been
    /// flushed. `status` may be empty.
    pub fn update(&mut self, frame: &Frame, status: &str) -> io::Result<()> {
        let mut text = String::new();
        if self.rows_drawn > 0 {
            text.push_str(&format!("\x1b[{}A\r", self.rows_drawn));
        }

        let mut rows = 0;
        for line in self.plot_lines(frame) {
            text.push_str(&line);
            text.push_str("\x1b[K\n");
            rows += 1;
        }
        for line in status.lines() {
            text.push_str(line);
            text.push_str("\x1b[K\n");
            rows += 1;
        }

        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.rows_drawn = rows;
        Ok(())
    }

    /// Tears the panel down, leaving the last drawing on screen.
    pub fn finish(mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    fn plot_lines(&self, frame: &Frame) -> Vec<String> {
        let samples = frame.samples();
        let n = samples.len();
        let mut grid = vec![vec![' '; self.width]; self.height];

        // One column per bucket of samples, drawn as its min..max band.
        for (c, column) in (0..self.width).map(|c| (c, self.bucket(samples, n, c))) {
            if let Some((lo, hi)) = column {
                let top = self.row_for(hi);
                let bottom = self.row_for(lo);
                for row in grid.iter_mut().take(bottom + 1).skip(top) {
                    row[c] = '*';
                }
            }
        }

        let mut lines = Vec::with_capacity(self.height + 2);
        for (r, row) in grid.iter().enumerate() {
            let label = if r == 0 {
                SAMPLE_MAX.to_string()
            } else if r == self.height - 1 {
                "0".to_string()
            } else {
                String::new()
            };
            let cells: String = row.iter().collect();
            lines.push(format!("{label:>w$} |{cells}", w = GUTTER));
        }
        lines.push(format!("{:>w$} +{}", "", "-".repeat(self.width), w = GUTTER));
        lines.push(format!(
            "{:>w$}  0{:>x$}",
            "",
            BUFFER_SIZE,
            w = GUTTER,
            x = self.width - 1
        ));
        lines
    }

    fn bucket(&self, samples: &[u16], n: usize, column: usize) -> Option<(u16, u16)> {
        let start = column * n / self.width;
        let end = (((column + 1) * n) / self.width).max(start + 1).min(n);
        let slice = samples.get(start..end)?;
        let lo = slice.iter().copied().min()?;
        let hi = slice.iter().copied().max()?;
        Some((lo, hi))
    }

    fn row_for(&self, value: u16) -> usize {
        let v = value.min(SAMPLE_MAX) as usize;
        (self.height - 1) - v * (self.height - 1) / SAMPLE_MAX as usize
    }
}
