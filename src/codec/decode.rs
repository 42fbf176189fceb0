//! Rebuilding a file from `k` of its pieces

use super::config::CodecConfig;
use super::error::{CodecError, Result};
use super::header::PieceHeader;
use super::partial::PartialFile;
use super::{code_windows, READ_BUFFER_SIZE};
use crate::reed_solomon::{Decoder, Gf256, ReedSolomonCode};
use crate::reporters::{CodecReporter, SilentReporter};
use log::{debug, info, warn};
use rustc_hash::FxHashSet as HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// What a successful decode used and produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    pub file_name: String,
    pub n: usize,
    pub k: usize,
    pub size: u64,
    /// Piece indices used, in the order they were supplied
    pub positions: Vec<usize>,
}

/// A piece file positioned at its first body byte
struct OpenPiece {
    path: PathBuf,
    header: PieceHeader,
    header_len: usize,
    reader: BufReader<File>,
}

impl OpenPiece {
    fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CodecError::FileOpenError {
            file: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let (header, header_len) =
            PieceHeader::read_from(&mut reader).map_err(|e| CodecError::HeaderMismatch {
                file: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            header,
            header_len,
            reader,
        })
    }

    /// Body must hold exactly one byte per window
    fn check_body_len(&self) -> Result<()> {
        let file_len = self
            .reader
            .get_ref()
            .metadata()
            .map_err(|source| CodecError::FileReadError {
                file: self.path.clone(),
                source,
            })?
            .len();
        let actual = file_len.saturating_sub(self.header_len as u64);
        let expected = self.header.window_count();
        if actual != expected {
            return Err(CodecError::TruncatedPiece {
                file: self.path.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn read_exact(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.reader
            .read_exact(buffer)
            .map_err(|source| CodecError::FileReadError {
                file: self.path.clone(),
                source,
            })
    }
}

/// Rebuild the original file from at least `k` pieces and write it to `output`
///
/// `k` is read from the piece headers. A piece index seen earlier in the
/// input is skipped, and only the first `k` distinct pieces, in the order
/// given, are used for decoding; every supplied piece must still carry a
/// header consistent with the others.
pub fn decode_files<P: AsRef<Path>>(
    pieces: &[P],
    output: impl AsRef<Path>,
) -> Result<DecodeSummary> {
    decode_files_with_config(pieces, output.as_ref(), &CodecConfig::default(), &SilentReporter)
}

/// Decode with explicit configuration and progress reporting
pub fn decode_files_with_config<P: AsRef<Path>, R: CodecReporter + ?Sized>(
    pieces: &[P],
    output: &Path,
    config: &CodecConfig,
    reporter: &R,
) -> Result<DecodeSummary> {
    if pieces.is_empty() {
        // k is at least 1 for any valid encoding
        return Err(CodecError::InsufficientPieces {
            needed: 1,
            available: 0,
        });
    }

    let mut opened = pieces
        .iter()
        .map(|path| OpenPiece::open(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let reference = opened[0].header.clone();
    for piece in &opened[1..] {
        if let Some(field) = reference.mismatch(&piece.header) {
            return Err(CodecError::HeaderMismatch {
                file: piece.path.clone(),
                reason: format!("{} differs from {}", field, opened[0].path.display()),
            });
        }
    }

    let (n, k) = (reference.n, reference.k);
    let supplied = opened.len();
    let mut seen = HashSet::default();
    opened.retain(|piece| seen.insert(piece.header.piece_index));
    if opened.len() < supplied {
        warn!(
            "Ignoring {} repeated piece(s); each piece index counts once",
            supplied - opened.len()
        );
    }

    if opened.len() < k {
        return Err(CodecError::InsufficientPieces {
            needed: k,
            available: opened.len(),
        });
    }
    if opened.len() > k {
        warn!(
            "Using the first {} of {} distinct pieces, ignoring the rest",
            k,
            opened.len()
        );
    }
    opened.truncate(k);

    let positions: Vec<usize> = opened.iter().map(|p| p.header.piece_index).collect();
    for piece in &opened {
        piece.check_body_len()?;
    }

    let decoder = if k > 1 {
        let code = ReedSolomonCode::new(n, k, Gf256::with_config(config.use_multiplication_table))?;
        Some(code.decoder(&positions)?)
    } else {
        None
    };

    info!(
        "Decoding {} ({} bytes) from pieces {:?} into {}",
        reference.file_name,
        reference.size,
        positions,
        output.display()
    );
    reporter.report_decode_start(&reference.file_name, &positions, reference.size);

    let mut out = PartialFile::create(output)?;
    match &decoder {
        Some(decoder) => decode_windows(
            decoder,
            &mut opened,
            &mut out,
            reference.size,
            config,
            reporter,
        )?,
        None => copy_single(&mut opened[0], &mut out, reference.size, reporter)?,
    }
    out.commit()?;

    reporter.report_file_restored(output, reference.size);
    Ok(DecodeSummary {
        file_name: reference.file_name,
        n,
        k,
        size: reference.size,
        positions,
    })
}

/// `k == 1`: any piece body is the original file
fn copy_single<R: CodecReporter + ?Sized>(
    piece: &mut OpenPiece,
    out: &mut PartialFile,
    size: u64,
    reporter: &R,
) -> Result<()> {
    debug!("k=1, copying piece {}", piece.header.piece_index);
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let mut remaining = size;
    while remaining > 0 {
        let chunk = remaining.min(buffer.len() as u64) as usize;
        piece.read_exact(&mut buffer[..chunk])?;
        out.write_all(&buffer[..chunk])?;
        remaining -= chunk as u64;
        reporter.report_windows(size - remaining, size);
    }
    Ok(())
}

/// Read one symbol per window from each piece, decode, write up to `k` bytes
fn decode_windows<R: CodecReporter + ?Sized>(
    decoder: &Decoder,
    pieces: &mut [OpenPiece],
    out: &mut PartialFile,
    size: u64,
    config: &CodecConfig,
    reporter: &R,
) -> Result<()> {
    let k = pieces.len();
    let total_windows = size.div_ceil(k as u64);
    let batch = (config.effective_batch_windows() as u64).min(total_windows.max(1)) as usize;
    config.configure_thread_pool();

    let mut column = vec![0u8; batch];
    let mut received = vec![0u8; batch * k];
    let mut messages = vec![0u8; batch * k];

    let mut done = 0u64;
    let mut remaining = size;
    while done < total_windows {
        let windows = (total_windows - done).min(batch as u64) as usize;

        let received = &mut received[..windows * k];
        for (j, piece) in pieces.iter_mut().enumerate() {
            let column = &mut column[..windows];
            piece.read_exact(column)?;
            for (window, &symbol) in column.iter().enumerate() {
                received[window * k + j] = symbol;
            }
        }

        let messages = &mut messages[..windows * k];
        code_windows(config.parallel, received, k, messages, k, |symbols, message| {
            decoder.decode_into(symbols, message)
        })?;

        // The last window may carry padding past the original size
        let bytes = remaining.min((windows * k) as u64) as usize;
        out.write_all(&messages[..bytes])?;
        remaining -= bytes as u64;

        done += windows as u64;
        debug!("Decoded {}/{} windows", done, total_windows);
        reporter.report_windows(done, total_windows);
    }
    Ok(())
}
