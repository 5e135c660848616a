//! Option models, enums and value snapshots shared by the filesystem operations.

use std::path::PathBuf;
use std::time::SystemTime;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Symlink handling policy for directory traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumWalkSymlinkStrategy {
    /// Descend into directories reached through symbolic links.
    Follow,
    /// Yield symbolic links as plain entries; never descend through them.
    NoFollow,
}

/// Existing destination file conflict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyFileConflictStrategy {
    /// Replace destination file with source file.
    Overwrite,
    /// Fail with [`crate::FsError::AlreadyExists`] and leave destination untouched.
    Error,
}

/// Pattern matching mode for include/exclude lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Substring match.
    Literal,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Snapshots

/// Point-in-time metadata of one path, produced by [`crate::inspect`].
///
/// Non-existence is a reportable state: when `if_exists` is false every flag
/// is false, `time_modified` is `None` and `n_size_bytes` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileMetadata {
    /// Path as supplied by the caller.
    pub path: PathBuf,
    /// The path (after following links) resolves to an entry.
    pub if_exists: bool,
    /// Entry is a directory.
    pub if_is_dir: bool,
    /// Entry is a regular file.
    pub if_is_file: bool,
    /// The path itself is a symbolic link (dangling or not).
    pub if_is_symlink: bool,
    /// Entry can be opened (file) or listed (directory).
    pub if_readable: bool,
    /// Entry can be opened for writing.
    pub if_writable: bool,
    /// Entry carries an execute permission.
    pub if_executable: bool,
    /// Last modification time, when the platform reports one.
    pub time_modified: Option<SystemTime>,
    /// Size in bytes.
    pub n_size_bytes: u64,
    /// Best-effort MIME type.
    pub content_type: Option<String>,
}

impl SpecFileMetadata {
    pub(crate) fn absent(path: PathBuf, if_is_symlink: bool, content_type: Option<String>) -> Self {
        Self {
            path,
            if_exists: false,
            if_is_dir: false,
            if_is_file: false,
            if_is_symlink,
            if_readable: false,
            if_writable: false,
            if_executable: false,
            time_modified: None,
            n_size_bytes: 0,
            content_type,
        }
    }
}

/// One entry yielded by [`crate::walk::WalkIter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecWalkEntry {
    /// Entry path (root joined with the relative components).
    pub path: PathBuf,
    /// Distance from the walk root; root itself is 0.
    pub depth: usize,
    /// Entry is a directory (through the link when following symlinks).
    pub if_is_dir: bool,
    /// Entry itself is a symbolic link.
    pub if_is_symlink: bool,
}

/// Outcome of one [`crate::copy::copy_file_with`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyFileReport {
    /// Canonical destination path actually written.
    pub path_dst: PathBuf,
    /// Bytes copied (0 for directory sources and same-file no-ops).
    pub cnt_bytes: u64,
    /// A pre-existing destination entry was replaced.
    pub if_replaced: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for [`crate::walk::walk_with`].
#[derive(Debug, Clone)]
pub struct SpecWalkOptions {
    /// Include patterns applied to file basename.
    pub patterns_include_files: Option<Vec<String>>,
    /// Exclude patterns applied to file basename.
    pub patterns_exclude_files: Option<Vec<String>>,
    /// Include patterns applied to directory basename.
    pub patterns_include_dirs: Option<Vec<String>>,
    /// Exclude patterns applied to directory basename.
    pub patterns_exclude_dirs: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumPatternMode,
    /// Symlink handling behavior.
    pub rule_symlink: EnumWalkSymlinkStrategy,
    /// Deepest entry yielded; `None` walks the whole tree, `Some(0)` yields root only.
    pub depth_max: Option<usize>,
    /// Log and skip unreadable directories instead of yielding `Err` items.
    pub if_skip_errors: bool,
}

impl Default for SpecWalkOptions {
    fn default() -> Self {
        Self {
            patterns_include_files: None,
            patterns_exclude_files: None,
            patterns_include_dirs: None,
            patterns_exclude_dirs: None,
            rule_pattern: EnumPatternMode::Glob,
            rule_symlink: EnumWalkSymlinkStrategy::NoFollow,
            depth_max: None,
            if_skip_errors: false,
        }
    }
}

/// Input options for [`crate::copy::copy_file_with`].
#[derive(Debug, Clone)]
pub struct SpecCopyFileOptions {
    /// Conflict behavior for an existing destination.
    pub rule_conflict: EnumCopyFileConflictStrategy,
    /// Carry permissions, timestamps and (Linux) extended attributes over.
    pub if_preserve_metadata: bool,
}

impl Default for SpecCopyFileOptions {
    fn default() -> Self {
        Self {
            rule_conflict: EnumCopyFileConflictStrategy::Error,
            if_preserve_metadata: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
