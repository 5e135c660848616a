//! Metadata snapshots and content-type probing.

use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::Path;

use tracing::debug;

use crate::conf::{N_LEN_EXTENSION_MAX, N_PROBE_PREFIX_BYTES, TUP_MIME_BY_EXTENSION};
use crate::error::{FsError, FsResult};
use crate::spec::SpecFileMetadata;
use crate::util::{derive_extension_lower, read_prefix};

/// Take a metadata snapshot of `path`.
///
/// A missing path is not an error: the snapshot reports `if_exists == false`.
/// Links are followed for every field except `if_is_symlink`, so a dangling
/// link reports `if_exists == false, if_is_symlink == true`.
///
/// Fails only when the stat call fails for another reason (for example a
/// parent directory without search permission).
pub fn inspect<P: AsRef<Path>>(path: P) -> FsResult<SpecFileMetadata> {
    let path = path.as_ref();

    let if_is_symlink = match fs::symlink_metadata(path) {
        Ok(meta_link) => meta_link.file_type().is_symlink(),
        Err(e) if is_absent(&e) => false,
        Err(e) => return Err(FsError::from_io(path, e)),
    };

    let meta = match fs::metadata(path) {
        Ok(v) => v,
        Err(e) if is_absent(&e) => {
            debug!(path = %path.display(), if_is_symlink, "inspect: absent");
            return Ok(SpecFileMetadata::absent(
                path.to_path_buf(),
                if_is_symlink,
                probe_content_type_by_name(path).map(str::to_string),
            ));
        }
        Err(e) => return Err(FsError::from_io(path, e)),
    };

    let content_type = if meta.is_file() {
        probe_content_type(path)
    } else {
        None
    };

    let spec_meta = SpecFileMetadata {
        path: path.to_path_buf(),
        if_exists: true,
        if_is_dir: meta.is_dir(),
        if_is_file: meta.is_file(),
        if_is_symlink,
        if_readable: is_readable(path, &meta),
        if_writable: is_writable(path, &meta),
        if_executable: is_executable(path, &meta),
        time_modified: meta.modified().ok(),
        n_size_bytes: meta.len(),
        content_type,
    };
    debug!(
        path = %path.display(),
        n_size_bytes = spec_meta.n_size_bytes,
        content_type = ?spec_meta.content_type,
        "inspect"
    );
    Ok(spec_meta)
}

/// Best-effort MIME type of `path`.
///
/// The extension table wins; otherwise the head of an existing regular file
/// is sniffed for a known signature. `None` means the type is undetermined.
pub fn probe_content_type<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();
    if let Some(mime) = probe_content_type_by_name(path) {
        return Some(mime.to_string());
    }
    if !path.is_file() {
        return None;
    }

    let mut buf = vec![0u8; N_PROBE_PREFIX_BYTES];
    let n_read = match read_prefix(path, &mut buf) {
        Ok(n) => n,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "content sniffing skipped");
            return None;
        }
    };
    infer::get(&buf[..n_read]).map(|kind| kind.mime_type().to_string())
}

/// MIME type from the file-name extension alone; never touches the filesystem.
pub fn probe_content_type_by_name(path: &Path) -> Option<&'static str> {
    let ext = derive_extension_lower(path)?;
    if ext.len() > N_LEN_EXTENSION_MAX {
        return None;
    }
    TUP_MIME_BY_EXTENSION
        .iter()
        .find(|(ext_known, _)| *ext_known == ext)
        .map(|(_, mime)| *mime)
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn is_readable(path: &Path, meta: &Metadata) -> bool {
    if meta.is_dir() {
        return fs::read_dir(path).is_ok();
    }
    if meta.is_file() {
        return fs::File::open(path).is_ok();
    }
    // Opening a FIFO or device may block; fall back to the mode bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o444 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn is_writable(path: &Path, meta: &Metadata) -> bool {
    if meta.is_file() {
        // Append mode never truncates, and without `create` nothing new appears.
        return OpenOptions::new().append(true).open(path).is_ok();
    }
    !meta.permissions().readonly()
}

fn is_executable(path: &Path, meta: &Metadata) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = path;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        use crate::conf::TUP_EXECUTABLE_EXTENSIONS;
        meta.is_dir()
            || derive_extension_lower(path)
                .is_some_and(|ext| TUP_EXECUTABLE_EXTENSIONS.contains(&ext.as_str()))
    }
}
