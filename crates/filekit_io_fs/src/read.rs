//! Text and binary readers.
//!
//! Every reader opens its file when constructed and closes it when dropped.
//! The lazy sequences ([`LinesIter`], [`LineCursor`], [`ChunkIter`]) are
//! single-pass: reading again means calling the constructor again.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::conf::N_READ_ALL_BYTES_MAX;
use crate::error::{FsError, FsResult};
use crate::util::fill_buffer;

////////////////////////////////////////////////////////////////////////////////
// #region TextReaders

/// Lazy UTF-8 line sequence over one open file.
///
/// `\n` and `\r\n` terminators are stripped. A decode failure yields one
/// [`FsError::Decode`] and ends the sequence.
#[derive(Debug)]
pub struct LinesIter {
    cursor: LineCursor,
    if_done: bool,
}

impl Iterator for LinesIter {
    type Item = FsResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.if_done {
            return None;
        }
        match self.cursor.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.if_done = true;
                None
            }
            Err(e) => {
                self.if_done = true;
                Some(Err(e))
            }
        }
    }
}

/// Explicit advance-or-end cursor over the lines of one open file.
#[derive(Debug)]
pub struct LineCursor {
    path: PathBuf,
    reader: BufReader<File>,
    buf_line: Vec<u8>,
    n_line: usize,
}

impl LineCursor {
    /// Advance to the next line; `Ok(None)` at end of file.
    pub fn next_line(&mut self) -> FsResult<Option<String>> {
        self.buf_line.clear();
        let n_read = self
            .reader
            .read_until(b'\n', &mut self.buf_line)
            .map_err(|e| FsError::from_io(&self.path, e))?;
        if n_read == 0 {
            return Ok(None);
        }
        self.n_line += 1;

        if self.buf_line.last() == Some(&b'\n') {
            self.buf_line.pop();
            if self.buf_line.last() == Some(&b'\r') {
                self.buf_line.pop();
            }
        }
        let line = String::from_utf8(std::mem::take(&mut self.buf_line)).map_err(|_| {
            FsError::Decode {
                path: self.path.clone(),
                n_line: self.n_line,
            }
        })?;
        Ok(Some(line))
    }

    /// Number of lines consumed so far (1-based index of the last line read).
    pub fn n_line(&self) -> usize {
        self.n_line
    }
}

/// Open `path` for lazy line-by-line iteration.
pub fn read_lines<P: AsRef<Path>>(path: P) -> FsResult<LinesIter> {
    Ok(LinesIter {
        cursor: read_line_by_line(path)?,
        if_done: false,
    })
}

/// Read every line of `path` into memory.
pub fn read_all_lines<P: AsRef<Path>>(path: P) -> FsResult<Vec<String>> {
    read_lines(path)?.collect()
}

/// Open `path` behind an explicit [`LineCursor`].
pub fn read_line_by_line<P: AsRef<Path>>(path: P) -> FsResult<LineCursor> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
    debug!(path = %path.display(), "open for line reading");
    Ok(LineCursor {
        path: path.to_path_buf(),
        reader: BufReader::new(file),
        buf_line: Vec::new(),
        n_line: 0,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BinaryReaders

/// Read the whole of `path` into one buffer.
///
/// Fails with [`FsError::OutOfResources`] for files larger than
/// [`N_READ_ALL_BYTES_MAX`].
pub fn read_all_bytes<P: AsRef<Path>>(path: P) -> FsResult<Vec<u8>> {
    read_all_bytes_with_limit(path, N_READ_ALL_BYTES_MAX)
}

/// [`read_all_bytes`] with a caller-chosen size ceiling.
pub fn read_all_bytes_with_limit<P: AsRef<Path>>(path: P, n_limit_bytes: u64) -> FsResult<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
    let n_size_hint = file
        .metadata()
        .map_err(|e| FsError::from_io(path, e))?
        .len();

    let err_too_large = |n_size_bytes: u64| FsError::OutOfResources {
        path: path.to_path_buf(),
        n_size_bytes,
        n_limit_bytes,
    };
    if n_size_hint > n_limit_bytes {
        return Err(err_too_large(n_size_hint));
    }

    let mut buf = Vec::new();
    let n_capacity = usize::try_from(n_size_hint).map_err(|_| err_too_large(n_size_hint))?;
    buf.try_reserve_exact(n_capacity)
        .map_err(|_| err_too_large(n_size_hint))?;

    // The file may grow between stat and read; never buffer past the ceiling.
    let n_read = file
        .take(n_limit_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| FsError::from_io(path, e))?;
    if n_read as u64 > n_limit_bytes {
        return Err(err_too_large(n_read as u64));
    }
    debug!(path = %path.display(), n_read, "read all bytes");
    Ok(buf)
}

/// Lazy sequence of fixed-size chunks over one open file.
///
/// Every chunk except the last holds exactly `chunk_size` bytes; an empty file
/// yields no chunks. An I/O error is yielded once and ends the sequence.
#[derive(Debug)]
pub struct ChunkIter {
    path: PathBuf,
    file: File,
    n_chunk_size: usize,
    cnt_chunks: usize,
    if_done: bool,
}

impl ChunkIter {
    /// Chunks produced so far.
    pub fn cnt_chunks(&self) -> usize {
        self.cnt_chunks
    }
}

impl Iterator for ChunkIter {
    type Item = FsResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.if_done {
            return None;
        }
        let mut buf = vec![0u8; self.n_chunk_size];
        match fill_buffer(&mut self.file, &mut buf) {
            Ok(0) => {
                self.if_done = true;
                None
            }
            Ok(n) => {
                if n < self.n_chunk_size {
                    buf.truncate(n);
                    self.if_done = true;
                }
                self.cnt_chunks += 1;
                Some(Ok(buf))
            }
            Err(e) => {
                self.if_done = true;
                Some(Err(FsError::from_io(&self.path, e)))
            }
        }
    }
}

/// Open `path` for chunked reading, `chunk_size` bytes per step.
pub fn read_chunked<P: AsRef<Path>>(path: P, chunk_size: usize) -> FsResult<ChunkIter> {
    let path = path.as_ref();
    if chunk_size == 0 {
        return Err(FsError::InvalidInput(
            "Arg `chunk_size` must be >= 1.".to_string(),
        ));
    }
    let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
    debug!(path = %path.display(), chunk_size, "open for chunked reading");
    Ok(ChunkIter {
        path: path.to_path_buf(),
        file,
        n_chunk_size: chunk_size,
        cnt_chunks: 0,
        if_done: false,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
