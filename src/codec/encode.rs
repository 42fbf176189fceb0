//! Encoding a file into `n` pieces

use super::config::CodecConfig;
use super::error::{CodecError, Result};
use super::header::{is_storable_file_name, PieceHeader};
use super::partial::{commit_all, PartialFile};
use super::{code_windows, piece_path, READ_BUFFER_SIZE};
use crate::reed_solomon::{validate_parameters, Gf256, ReedSolomonCode};
use crate::reporters::{CodecReporter, SilentReporter};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Encode `source` into `n` pieces named `<prefix>.p_0` … `<prefix>.p_{n-1}`
///
/// Any `k` of the returned pieces are enough for [`decode_files`](super::decode_files).
/// Requires `0 < k < n <= 256`.
pub fn encode_file(
    source: impl AsRef<Path>,
    prefix: impl AsRef<Path>,
    n: usize,
    k: usize,
) -> Result<Vec<PathBuf>> {
    encode_file_with_config(
        source.as_ref(),
        prefix.as_ref(),
        n,
        k,
        &CodecConfig::default(),
        &SilentReporter,
    )
}

/// Encode with explicit configuration and progress reporting
pub fn encode_file_with_config<R: CodecReporter + ?Sized>(
    source: &Path,
    prefix: &Path,
    n: usize,
    k: usize,
    config: &CodecConfig,
    reporter: &R,
) -> Result<Vec<PathBuf>> {
    if validate_parameters(n, k).is_err() {
        return Err(CodecError::InvalidParameters { n, k });
    }
    let file_name = header_file_name(source)?;

    let input = File::open(source).map_err(|source_err| CodecError::FileOpenError {
        file: source.to_path_buf(),
        source: source_err,
    })?;
    let size = input
        .metadata()
        .map_err(|e| CodecError::FileReadError {
            file: source.to_path_buf(),
            source: e,
        })?
        .len();

    // Built before any output exists so a bad code leaves nothing behind
    let code = if k > 1 {
        Some(ReedSolomonCode::new(
            n,
            k,
            Gf256::with_config(config.use_multiplication_table),
        )?)
    } else {
        None
    };

    info!(
        "Encoding {} ({} bytes) into {} pieces with k={}",
        source.display(),
        size,
        n,
        k
    );
    reporter.report_encode_start(&file_name, n, k, size);

    let header = PieceHeader::new(file_name, n, k, size, 0);
    let mut pieces = (0..n)
        .map(|index| {
            let mut piece = PartialFile::create(&piece_path(prefix, index))?;
            piece.write_all(header.for_piece(index).to_line().as_bytes())?;
            Ok(piece)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, input);
    match &code {
        Some(code) => encode_windows(
            code,
            &mut reader,
            source,
            &mut pieces,
            size,
            config,
            reporter,
        )?,
        None => replicate(&mut reader, source, &mut pieces, size, reporter)?,
    }

    let paths = commit_all(pieces)?;
    info!("Wrote {} pieces for {}", paths.len(), source.display());
    reporter.report_pieces_written(&paths);
    Ok(paths)
}

/// Name recorded in piece headers: the last component of `source`
fn header_file_name(source: &Path) -> Result<String> {
    let name = source
        .file_name()
        .ok_or_else(|| CodecError::InvalidFileName(source.display().to_string()))?;
    let name = name
        .to_str()
        .ok_or_else(|| CodecError::InvalidFileName(name.to_string_lossy().into_owned()))?;
    if !is_storable_file_name(name) {
        return Err(CodecError::InvalidFileName(name.to_string()));
    }
    Ok(name.to_string())
}

/// `k == 1`: every piece is a copy of the source
fn replicate<R: CodecReporter + ?Sized>(
    reader: &mut impl Read,
    source: &Path,
    pieces: &mut [PartialFile],
    size: u64,
    reporter: &R,
) -> Result<()> {
    debug!("k=1, writing {} identical copies", pieces.len());
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let mut remaining = size;
    while remaining > 0 {
        let chunk = remaining.min(buffer.len() as u64) as usize;
        reader
            .read_exact(&mut buffer[..chunk])
            .map_err(|e| CodecError::FileReadError {
                file: source.to_path_buf(),
                source: e,
            })?;
        for piece in pieces.iter_mut() {
            piece.write_all(&buffer[..chunk])?;
        }
        remaining -= chunk as u64;
        reporter.report_windows(size - remaining, size);
    }
    Ok(())
}

/// Encode consecutive `k`-byte windows and append one symbol to each piece
fn encode_windows<R: CodecReporter + ?Sized>(
    code: &ReedSolomonCode,
    reader: &mut impl Read,
    source: &Path,
    pieces: &mut [PartialFile],
    size: u64,
    config: &CodecConfig,
    reporter: &R,
) -> Result<()> {
    let (n, k) = (code.n(), code.k());
    let total_windows = size.div_ceil(k as u64);
    let batch = (config.effective_batch_windows() as u64).min(total_windows.max(1)) as usize;
    config.configure_thread_pool();

    let mut messages = vec![0u8; batch * k];
    let mut codewords = vec![0u8; batch * n];
    let mut column = vec![0u8; batch];

    let mut done = 0u64;
    let mut remaining = size;
    while done < total_windows {
        let windows = (total_windows - done).min(batch as u64) as usize;
        let bytes = remaining.min((windows * k) as u64) as usize;

        let messages = &mut messages[..windows * k];
        reader
            .read_exact(&mut messages[..bytes])
            .map_err(|e| CodecError::FileReadError {
                file: source.to_path_buf(),
                source: e,
            })?;
        // Zero-pad the final short window
        messages[bytes..].fill(0);
        remaining -= bytes as u64;

        let codewords = &mut codewords[..windows * n];
        code_windows(config.parallel, messages, k, codewords, n, |message, codeword| {
            code.encode_into(message, codeword)
        })?;

        for (index, piece) in pieces.iter_mut().enumerate() {
            for (slot, codeword) in column.iter_mut().zip(codewords.chunks_exact(n)) {
                *slot = codeword[index];
            }
            piece.write_all(&column[..windows])?;
        }

        done += windows as u64;
        debug!("Encoded {}/{} windows", done, total_windows);
        reporter.report_windows(done, total_windows);
    }
    Ok(())
}
