//! File erasure coding
//!
//! Splits a file into `n` piece files such that any `k` of them rebuild the
//! original bytes. The source is read in `k`-byte windows; each window is
//! encoded into an `n`-symbol codeword and symbol `i` is appended to piece
//! `i`. Every piece therefore holds one byte per window after its header
//! line (see [`header`]).
//!
//! Outputs are written through [`partial::PartialFile`], so a failed
//! operation leaves no file under a final name.

mod config;
mod decode;
mod encode;
mod error;
pub mod header;
pub mod partial;

pub use config::{CodecConfig, DEFAULT_BATCH_WINDOWS};
pub use decode::{decode_files, decode_files_with_config, DecodeSummary};
pub use encode::{encode_file, encode_file_with_config};
pub use error::{CodecError, Result};
pub use header::{HeaderError, PieceHeader, HEADER_MAGIC};

use crate::reed_solomon::RsResult;
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Path of piece `index` for an output prefix: `<prefix>.p_<index>`
pub fn piece_path(prefix: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(format!(".p_{}", index));
    PathBuf::from(name)
}

/// Read buffer size for source and piece files
const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Run `op` over matching fixed-size chunks of `input` and `output`
///
/// Chunks are independent, so they may be processed in parallel; each
/// output chunk is written by exactly one call.
fn code_windows<F>(
    parallel: bool,
    input: &[u8],
    input_len: usize,
    output: &mut [u8],
    output_len: usize,
    op: F,
) -> RsResult<()>
where
    F: Fn(&[u8], &mut [u8]) -> RsResult<()> + Sync,
{
    if parallel {
        input
            .par_chunks(input_len)
            .zip(output.par_chunks_mut(output_len))
            .try_for_each(|(window, out)| op(window, out))
    } else {
        input
            .chunks(input_len)
            .zip(output.chunks_mut(output_len))
            .try_for_each(|(window, out)| op(window, out))
    }
}
