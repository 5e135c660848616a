//! Error taxonomy shared by every filesystem operation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Coarse failure category, for callers that branch on the kind of failure
/// instead of matching every [`FsError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFsErrorKind {
    /// Path absent when presence was required.
    NotFound,
    /// Destination occupied and overwrite disallowed.
    AlreadyExists,
    /// Access denied by the host.
    PermissionDenied,
    /// Generic read/write/decode failure.
    Io,
    /// Content too large to buffer eagerly.
    OutOfResources,
    /// Caller supplied an invalid argument (chunk size, pattern, ...).
    InvalidInput,
}

/// Failure of one filesystem operation. Every variant carrying a path names
/// the entry the operation was acting on when it failed.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("No such file or directory: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Destination exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Directory not empty: {}", .path.display())]
    DirectoryNotEmpty { path: PathBuf },

    #[error("Invalid UTF-8 in {} at line {n_line}", .path.display())]
    Decode { path: PathBuf, n_line: usize },

    #[error(
        "File too large to buffer: {} ({n_size_bytes} bytes, limit {n_limit_bytes})",
        .path.display()
    )]
    OutOfResources {
        path: PathBuf,
        n_size_bytes: u64,
        n_limit_bytes: u64,
    },

    #[error("Out of memory on {}: {source}", .path.display())]
    OutOfMemory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type FsResult<T> = Result<T, FsError>;

impl FsError {
    /// Category of this failure.
    pub fn kind(&self) -> EnumFsErrorKind {
        match self {
            Self::NotFound { .. } => EnumFsErrorKind::NotFound,
            Self::AlreadyExists { .. } => EnumFsErrorKind::AlreadyExists,
            Self::PermissionDenied { .. } => EnumFsErrorKind::PermissionDenied,
            Self::OutOfResources { .. } | Self::OutOfMemory { .. } => {
                EnumFsErrorKind::OutOfResources
            }
            Self::InvalidPattern { .. } | Self::InvalidInput(_) => EnumFsErrorKind::InvalidInput,
            Self::NotADirectory { .. }
            | Self::DirectoryNotEmpty { .. }
            | Self::Decode { .. }
            | Self::Io { .. } => EnumFsErrorKind::Io,
        }
    }

    /// Path the failure refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::PermissionDenied { path, .. }
            | Self::NotADirectory { path }
            | Self::DirectoryNotEmpty { path }
            | Self::Decode { path, .. }
            | Self::OutOfResources { path, .. }
            | Self::OutOfMemory { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidPattern { .. } | Self::InvalidInput(_) => None,
        }
    }

    /// Classify a raw `io::Error` raised while acting on `path`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::DirectoryNotEmpty => Self::DirectoryNotEmpty { path },
            io::ErrorKind::OutOfMemory => Self::OutOfMemory { path, source },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{EnumFsErrorKind, FsError};

    #[test]
    fn from_io_maps_kinds() {
        let path = Path::new("/tmp/x");
        let cases = [
            (io::ErrorKind::NotFound, EnumFsErrorKind::NotFound),
            (io::ErrorKind::AlreadyExists, EnumFsErrorKind::AlreadyExists),
            (io::ErrorKind::PermissionDenied, EnumFsErrorKind::PermissionDenied),
            (io::ErrorKind::OutOfMemory, EnumFsErrorKind::OutOfResources),
            (io::ErrorKind::DirectoryNotEmpty, EnumFsErrorKind::Io),
            (io::ErrorKind::UnexpectedEof, EnumFsErrorKind::Io),
        ];
        for (kind_io, kind_expected) in cases {
            let err = FsError::from_io(path, io::Error::from(kind_io));
            assert_eq!(err.kind(), kind_expected, "{kind_io:?}");
            assert_eq!(err.path(), Some(path));
        }
    }

    #[test]
    fn display_names_the_path() {
        let err = FsError::AlreadyExists {
            path: "dst.txt".into(),
        };
        assert_eq!(err.to_string(), "Destination exists: dst.txt");

        let err = FsError::from_io(Path::new("big.bin"), io::Error::from(io::ErrorKind::OutOfMemory));
        assert!(err.to_string().starts_with("Out of memory on big.bin"));
        assert!(!err.to_string().contains("limit"));

        let err = FsError::InvalidInput("Arg `chunk_size` must be >= 1.".to_string());
        assert_eq!(err.path(), None);
        assert_eq!(err.kind(), EnumFsErrorKind::InvalidInput);
    }
}
