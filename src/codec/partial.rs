//! Write-then-rename output files
//!
//! Output is written to `<path>.partial` and only moved to its final name
//! once every byte has been flushed. Dropping a [`PartialFile`] without
//! committing it deletes the temporary file, so a failed encode or decode
//! never leaves a file under a final name.

use super::error::{CodecError, Result};
use log::debug;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to output paths while they are being written
pub const PARTIAL_SUFFIX: &str = ".partial";

const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Temporary path used while writing `path`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Output file that only appears under its final name after [`commit`](Self::commit)
pub struct PartialFile {
    final_path: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl PartialFile {
    pub fn create(final_path: &Path) -> Result<Self> {
        let temp_path = partial_path(final_path);
        let file = File::create(&temp_path).map_err(|source| CodecError::FileCreateError {
            file: temp_path.clone(),
            source,
        })?;
        Ok(Self {
            final_path: final_path.to_path_buf(),
            temp_path,
            writer: Some(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file)),
        })
    }

    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| CodecError::FileWriteError {
            file: self.temp_path.clone(),
            source: std::io::Error::other("file already finished"),
        })?;
        writer
            .write_all(bytes)
            .map_err(|source| CodecError::FileWriteError {
                file: self.temp_path.clone(),
                source,
            })
    }

    /// Flush buffered bytes and sync the temporary file to disk
    fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer
                .into_inner()
                .map_err(|e| CodecError::FileWriteError {
                    file: self.temp_path.clone(),
                    source: e.into_error(),
                })?;
            file.sync_all().map_err(|source| CodecError::FileWriteError {
                file: self.temp_path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn rename(&mut self) -> Result<()> {
        fs::rename(&self.temp_path, &self.final_path).map_err(|source| {
            CodecError::FileRenameError {
                temp_path: self.temp_path.clone(),
                final_path: self.final_path.clone(),
                source,
            }
        })?;
        // Nothing left to clean up
        self.temp_path.clear();
        Ok(())
    }

    /// Flush, sync and move the file to its final name
    pub fn commit(mut self) -> Result<PathBuf> {
        self.finish()?;
        self.rename()?;
        Ok(self.final_path.clone())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        self.writer.take();
        if !self.temp_path.as_os_str().is_empty() {
            debug!("Removing unfinished output {}", self.temp_path.display());
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Commit a group of files so that either all of them or none get final names
pub fn commit_all(mut files: Vec<PartialFile>) -> Result<Vec<PathBuf>> {
    for file in files.iter_mut() {
        file.finish()?;
    }

    let mut committed = Vec::with_capacity(files.len());
    for file in files.iter_mut() {
        if let Err(e) = file.rename() {
            for path in &committed {
                let _ = fs::remove_file(path);
            }
            return Err(e);
        }
        committed.push(file.final_path.clone());
    }
    Ok(committed)
}
