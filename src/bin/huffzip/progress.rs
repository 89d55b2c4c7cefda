//! Progress display for reading inputs and archive entries
//!
//! This relies on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::Read;

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// A wrapper around a reader that keeps track of how many bytes have been read
/// from the total and shows it as a progress bar on stderr.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: usize,
    /// Amount read so far
    pub read: usize,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor, initialized with zero bytes read
    pub fn new(reader: R, size: usize) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  \n[est. {eta} remaining]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::new(size as u64).with_style(style);
        // The default is 20hz, this reduces rendering overhead
        progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    /// Called after every read, updates the bar and logs a summary once everything is read
    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let per_second = self.total as f64 / elapsed.as_secs_f64().max(0.001);
            info!(
                "read {} in {} ({}/s avg)",
                HumanBytes(self.total as u64),
                HumanDuration(elapsed),
                HumanBytes(per_second as u64)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let out = self.reader.read(buf)?;
        self.read += out;
        self.update(out as u64);
        Ok(out)
    }
}
