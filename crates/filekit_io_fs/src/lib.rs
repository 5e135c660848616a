//! `filekit_io_fs` v1:
//! Small synchronous filesystem toolkit.
//!
//! Modules:
//! - `inspect` : metadata snapshots and content-type probing
//! - `walk`    : lazy depth-first directory traversal
//! - `read`    : line, whole-file and chunked readers
//! - `write`   : truncating line writer and append paths
//! - `copy`    : single-entry copy with conflict policy
//! - `spec`    : enums, options and value snapshots
//! - `error`   : error taxonomy
//! - `conf`    : constants and the extension -> MIME table
//! - `util`    : shared helper functions

pub mod conf;
pub mod copy;
pub mod error;
pub mod inspect;
pub mod read;
pub mod spec;
pub mod walk;
pub mod write;
mod util;

pub use copy::{copy_file, copy_file_with};
pub use error::{EnumFsErrorKind, FsError, FsResult};
pub use inspect::{inspect, probe_content_type};
pub use read::{
    ChunkIter, LineCursor, LinesIter, read_all_bytes, read_all_bytes_with_limit, read_all_lines,
    read_chunked, read_line_by_line, read_lines,
};
pub use spec::{
    EnumCopyFileConflictStrategy, EnumPatternMode, EnumWalkSymlinkStrategy, SpecCopyFileOptions,
    SpecCopyFileReport, SpecFileMetadata, SpecWalkEntry, SpecWalkOptions,
};
pub use walk::{WalkIter, walk, walk_with};
pub use write::{append_bytes, append_text, write_lines};
