//! Progress and output reporting for encode and decode operations
//!
//! The codec never prints on its own; callers inject a reporter. This keeps
//! the core free of global output state and lets the same code run silently
//! in tests or with console progress from the binary.

mod console;
mod silent;

pub use console::ConsoleReporter;
pub use silent::SilentReporter;

use std::path::{Path, PathBuf};

/// Base trait for all reporters
pub trait Reporter: Send + Sync {
    /// Report general progress with a message and completion percentage
    fn report_progress(&self, message: &str, progress: f64);

    /// Report successful completion of an operation
    fn report_complete(&self, message: &str);
}

/// Trait for reporting encode and decode progress
///
/// Extends the base Reporter trait with codec-specific methods
pub trait CodecReporter: Reporter {
    /// Report that a file is about to be split into `n` pieces
    fn report_encode_start(&self, file_name: &str, n: usize, k: usize, size: u64);

    /// Report the pieces written by a finished encode
    fn report_pieces_written(&self, pieces: &[PathBuf]);

    /// Report the pieces chosen for decoding
    fn report_decode_start(&self, file_name: &str, positions: &[usize], size: u64);

    /// Report a finished decode
    fn report_file_restored(&self, output: &Path, size: u64);

    /// Report windows coded so far
    fn report_windows(&self, done: u64, total: u64) {
        if total > 0 {
            self.report_progress("Processing", done as f64 / total as f64);
        }
    }
}
