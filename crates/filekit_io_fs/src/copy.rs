//! Single-entry copy with conflict policy and metadata preservation.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{FsError, FsResult};
use crate::spec::{EnumCopyFileConflictStrategy, SpecCopyFileOptions, SpecCopyFileReport};
use crate::util::{apply_metadata, is_same_entry, normalize_path};

/// Copy `path_src` to `path_dst` and return the resolved destination path.
///
/// With `if_overwrite == false` an existing destination fails with
/// [`FsError::AlreadyExists`] and is left untouched. Metadata is preserved.
pub fn copy_file<P, Q>(path_src: P, path_dst: Q, if_overwrite: bool) -> FsResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let spec_cp_options = SpecCopyFileOptions {
        rule_conflict: if if_overwrite {
            EnumCopyFileConflictStrategy::Overwrite
        } else {
            EnumCopyFileConflictStrategy::Error
        },
        ..SpecCopyFileOptions::default()
    };
    copy_file_with(path_src, path_dst, &spec_cp_options).map(|report| report.path_dst)
}

/// Copy one entry.
///
/// Rules:
/// - a directory source produces an empty directory at the destination;
/// - an existing destination symlink is replaced, never written through;
/// - an existing empty destination directory is replaced, a non-empty one
///   fails with [`FsError::DirectoryNotEmpty`];
/// - copying an entry onto itself is a no-op.
///
/// # Errors
/// Returns [`FsError`] when the source is missing or not a regular file or
/// directory, the destination conflicts, or the host copy fails.
pub fn copy_file_with<P, Q>(
    path_src: P,
    path_dst: Q,
    spec_cp_options: &SpecCopyFileOptions,
) -> FsResult<SpecCopyFileReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_src = path_src.as_ref();
    let path_dst = path_dst.as_ref();

    let meta_src = fs::metadata(path_src).map_err(|e| FsError::from_io(path_src, e))?;
    if !meta_src.is_file() && !meta_src.is_dir() {
        return Err(FsError::InvalidInput(format!(
            "Special file not copied: {}",
            path_src.display()
        )));
    }

    if is_same_entry(path_src, path_dst) {
        debug!(path = %path_src.display(), "copy onto itself skipped");
        return Ok(SpecCopyFileReport {
            path_dst: normalize_path(path_dst),
            cnt_bytes: 0,
            if_replaced: false,
        });
    }

    #[cfg(target_os = "linux")]
    {
        use std::os::unix::fs::MetadataExt;

        if meta_src.is_file() && meta_src.nlink() > 1 {
            debug!(path = %path_src.display(), "Hard link detected; copying content");
        }
    }

    let if_replaced = prepare_destination(path_dst, spec_cp_options.rule_conflict)?;

    let cnt_bytes = if meta_src.is_dir() {
        fs::create_dir(path_dst).map_err(|e| FsError::from_io(path_dst, e))?;
        0
    } else {
        match spec_cp_options.rule_conflict {
            EnumCopyFileConflictStrategy::Overwrite => {
                fs::copy(path_src, path_dst).map_err(|e| FsError::from_io(path_dst, e))?
            }
            EnumCopyFileConflictStrategy::Error => {
                let cnt_bytes = copy_exclusive(path_src, path_dst)?;
                fs::set_permissions(path_dst, meta_src.permissions())
                    .map_err(|e| FsError::from_io(path_dst, e))?;
                cnt_bytes
            }
        }
    };

    if spec_cp_options.if_preserve_metadata
        && let Err(e) = apply_metadata(path_src, path_dst)
    {
        warn!(path = %path_dst.display(), error = %e, "metadata not preserved");
    }

    let path_dst_resolved = fs::canonicalize(path_dst).map_err(|e| FsError::from_io(path_dst, e))?;
    debug!(
        src = %path_src.display(),
        dst = %path_dst_resolved.display(),
        cnt_bytes,
        if_replaced,
        "copy"
    );
    Ok(SpecCopyFileReport {
        path_dst: path_dst_resolved,
        cnt_bytes,
        if_replaced,
    })
}

/// Clear the way for a new destination entry; returns whether something was
/// removed.
fn prepare_destination(
    path_dst: &Path,
    rule_conflict: EnumCopyFileConflictStrategy,
) -> FsResult<bool> {
    let meta_dst = match fs::symlink_metadata(path_dst) {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(FsError::from_io(path_dst, e)),
    };
    if rule_conflict == EnumCopyFileConflictStrategy::Error {
        return Err(FsError::AlreadyExists {
            path: path_dst.to_path_buf(),
        });
    }

    if meta_dst.file_type().is_dir() {
        fs::remove_dir(path_dst).map_err(|e| FsError::from_io(path_dst, e))?;
    } else {
        fs::remove_file(path_dst).map_err(|e| FsError::from_io(path_dst, e))?;
    }
    Ok(true)
}

/// Stream `path_src` into a destination that must not exist yet. A partial
/// destination is removed on failure.
fn copy_exclusive(path_src: &Path, path_dst: &Path) -> FsResult<u64> {
    let mut file_src = File::open(path_src).map_err(|e| FsError::from_io(path_src, e))?;
    let mut file_dst = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path_dst)
        .map_err(|e| FsError::from_io(path_dst, e))?;

    match io::copy(&mut file_src, &mut file_dst) {
        Ok(cnt_bytes) => Ok(cnt_bytes),
        Err(e) => {
            drop(file_dst);
            let _ = fs::remove_file(path_dst);
            Err(FsError::from_io(path_dst, e))
        }
    }
}
