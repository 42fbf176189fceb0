//! Console reporter for encode and decode operations

use super::{CodecReporter, Reporter};
use std::path::{Path, PathBuf};

/// Console implementation printing progress to stdout
#[derive(Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn report_progress(&self, message: &str, progress: f64) {
        println!("{} ({:.1}%)", message, progress * 100.0);
    }

    fn report_complete(&self, message: &str) {
        println!("{}", message);
    }
}

impl CodecReporter for ConsoleReporter {
    fn report_encode_start(&self, file_name: &str, n: usize, k: usize, size: u64) {
        println!(
            "Encoding \"{}\" ({} bytes) into {} pieces, any {} recover it",
            file_name, size, n, k
        );
    }

    fn report_pieces_written(&self, pieces: &[PathBuf]) {
        for piece in pieces {
            println!("  Wrote {}", piece.display());
        }
        self.report_complete(&format!("Created {} pieces.", pieces.len()));
    }

    fn report_decode_start(&self, file_name: &str, positions: &[usize], size: u64) {
        println!(
            "Decoding \"{}\" ({} bytes) from pieces {:?}",
            file_name, size, positions
        );
    }

    fn report_file_restored(&self, output: &Path, size: u64) {
        self.report_complete(&format!("Restored {} bytes to {}.", size, output.display()));
    }
}
