//! Silent reporter
//!
//! Provides a no-output implementation for testing or when quiet operation is desired.

use super::{CodecReporter, Reporter};
use std::path::{Path, PathBuf};

/// Silent implementation for encode and decode operations
#[derive(Default)]
pub struct SilentReporter;

impl SilentReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SilentReporter {
    fn report_progress(&self, _message: &str, _progress: f64) {}
    fn report_complete(&self, _message: &str) {}
}

impl CodecReporter for SilentReporter {
    fn report_encode_start(&self, _file_name: &str, _n: usize, _k: usize, _size: u64) {}
    fn report_pieces_written(&self, _pieces: &[PathBuf]) {}
    fn report_decode_start(&self, _file_name: &str, _positions: &[usize], _size: u64) {}
    fn report_file_restored(&self, _output: &Path, _size: u64) {}
    fn report_windows(&self, _done: u64, _total: u64) {}
}
