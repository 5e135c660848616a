//! Truncating line writer and append paths.
//!
//! Appends write bytes verbatim: no separator is added before or after the
//! appended data, and the target file must already exist.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::conf::C_LINE_SEPARATOR;
use crate::error::{FsError, FsResult};

/// Write `lines` to `path`, each followed by `\n`.
///
/// Creates the file when absent and truncates it otherwise.
pub fn write_lines<P, I, S>(path: P, lines: I) -> FsResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| FsError::from_io(path, e))?;

    let mut writer = BufWriter::new(file);
    let mut cnt_lines = 0usize;
    for line in lines {
        writer
            .write_all(line.as_ref().as_bytes())
            .and_then(|_| writer.write_all(C_LINE_SEPARATOR.as_bytes()))
            .map_err(|e| FsError::from_io(path, e))?;
        cnt_lines += 1;
    }
    finish(writer, path)?;
    debug!(path = %path.display(), cnt_lines, "write lines");
    Ok(())
}

/// Append raw `data` to the existing file at `path`.
pub fn append_bytes<P: AsRef<Path>>(path: P, data: &[u8]) -> FsResult<()> {
    let path = path.as_ref();
    let mut file = open_append(path)?;
    file.write_all(data)
        .map_err(|e| FsError::from_io(path, e))?;
    debug!(path = %path.display(), n_bytes = data.len(), "append bytes");
    Ok(())
}

/// Append `text` to the existing file at `path` through a buffered writer.
///
/// The buffer is flushed before returning so a failed flush surfaces as an
/// error; the handle is closed on every path out of this function.
pub fn append_text<P: AsRef<Path>>(path: P, text: &str) -> FsResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(open_append(path)?);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| FsError::from_io(path, e))?;
    finish(writer, path)?;
    debug!(path = %path.display(), n_bytes = text.len(), "append text");
    Ok(())
}

fn open_append(path: &Path) -> FsResult<File> {
    OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| FsError::from_io(path, e))
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> FsResult<()> {
    writer.flush().map_err(|e| FsError::from_io(path, e))
}
