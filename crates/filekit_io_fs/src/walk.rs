//! Lazy depth-first directory traversal.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{FsError, FsResult};
use crate::spec::{EnumWalkSymlinkStrategy, SpecWalkEntry, SpecWalkOptions};
use crate::util::{SpecWalkPatterns, is_depth_within_limit, should_exclude_by_patterns};

#[cfg(unix)]
type TypeDirIdentity = (u64, u64);
#[cfg(not(unix))]
type TypeDirIdentity = PathBuf;

/// Entries of one opened directory, sorted by name, not yet yielded.
#[derive(Debug)]
struct SpecDirFrame {
    iter_entries: std::vec::IntoIter<FsResult<SpecWalkEntry>>,
}

/// Iterator over every entry reachable from a root directory.
///
/// The root comes first, then each directory's children in name order,
/// descending into a subdirectory right after yielding it. A directory is
/// opened only when the iterator advances past it, so stopping early never
/// reads the rest of the tree.
#[derive(Debug)]
pub struct WalkIter {
    spec_walk_options: SpecWalkOptions,
    spec_walk_pats: SpecWalkPatterns,
    entry_root: Option<SpecWalkEntry>,
    dir_pending: Option<(PathBuf, usize)>,
    l_stack: Vec<SpecDirFrame>,
    set_visited_dirs: HashSet<TypeDirIdentity>,
}

/// Walk every entry under `root` with default options (links not followed).
pub fn walk<P: AsRef<Path>>(root: P) -> FsResult<WalkIter> {
    walk_with(root, SpecWalkOptions::default())
}

/// Walk every entry under `root`.
///
/// Fails up front when `root` is missing or not a directory, or a pattern
/// does not compile. Later failures (an unreadable subdirectory, an entry that
/// vanished mid-walk) are yielded as `Err` items unless
/// `if_skip_errors` is set.
pub fn walk_with<P: AsRef<Path>>(root: P, spec_walk_options: SpecWalkOptions) -> FsResult<WalkIter> {
    let path_root = root.as_ref().to_path_buf();
    let meta_root = fs::metadata(&path_root).map_err(|e| FsError::from_io(&path_root, e))?;
    if !meta_root.is_dir() {
        return Err(FsError::NotADirectory { path: path_root });
    }
    let if_root_is_symlink = fs::symlink_metadata(&path_root)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    let spec_walk_pats = SpecWalkPatterns::from_raw(
        spec_walk_options.patterns_include_files.as_deref(),
        spec_walk_options.patterns_exclude_files.as_deref(),
        spec_walk_options.patterns_include_dirs.as_deref(),
        spec_walk_options.patterns_exclude_dirs.as_deref(),
        spec_walk_options.rule_pattern,
    )?;
    debug!(path = %path_root.display(), ?spec_walk_options, "walk");

    Ok(WalkIter {
        spec_walk_options,
        spec_walk_pats,
        entry_root: Some(SpecWalkEntry {
            path: path_root,
            depth: 0,
            if_is_dir: true,
            if_is_symlink: if_root_is_symlink,
        }),
        dir_pending: None,
        l_stack: Vec::new(),
        set_visited_dirs: HashSet::new(),
    })
}

impl Iterator for WalkIter {
    type Item = FsResult<SpecWalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.entry_root.take() {
            self.dir_pending = Some((entry.path.clone(), entry.depth));
            return Some(Ok(entry));
        }

        loop {
            if let Some((path_dir, depth)) = self.dir_pending.take() {
                match self.open_dir(&path_dir, depth) {
                    Ok(Some(frame)) => self.l_stack.push(frame),
                    Ok(None) => {}
                    Err(e) if self.spec_walk_options.if_skip_errors => {
                        warn!(path = %path_dir.display(), error = %e, "directory skipped");
                    }
                    Err(e) => return Some(Err(e)),
                }
            }

            let frame = self.l_stack.last_mut()?;
            let Some(res_entry) = frame.iter_entries.next() else {
                self.l_stack.pop();
                continue;
            };
            return match res_entry {
                Ok(entry) => {
                    if self.should_descend(&entry) {
                        self.dir_pending = Some((entry.path.clone(), entry.depth));
                    }
                    Some(Ok(entry))
                }
                Err(e) if self.spec_walk_options.if_skip_errors => {
                    warn!(error = %e, "entry skipped");
                    continue;
                }
                Err(e) => Some(Err(e)),
            };
        }
    }
}

impl WalkIter {
    fn should_descend(&self, entry: &SpecWalkEntry) -> bool {
        entry.if_is_dir
            && (!entry.if_is_symlink
                || self.spec_walk_options.rule_symlink == EnumWalkSymlinkStrategy::Follow)
    }

    /// Read and sort the children of `path_dir`; `Ok(None)` when the directory
    /// is beyond the depth limit or was already visited through a link.
    fn open_dir(&mut self, path_dir: &Path, depth: usize) -> FsResult<Option<SpecDirFrame>> {
        let depth_child = depth + 1;
        if !is_depth_within_limit(depth_child, self.spec_walk_options.depth_max) {
            return Ok(None);
        }
        if self.spec_walk_options.rule_symlink == EnumWalkSymlinkStrategy::Follow
            && !self.mark_visited(path_dir)?
        {
            warn!(path = %path_dir.display(), "Symlink loop detected");
            return Ok(None);
        }

        let iter_dir = fs::read_dir(path_dir).map_err(|e| FsError::from_io(path_dir, e))?;
        let mut l_entries: Vec<FsResult<SpecWalkEntry>> = Vec::new();
        for res_dir_entry in iter_dir {
            let dir_entry = match res_dir_entry {
                Ok(v) => v,
                Err(e) => {
                    l_entries.push(Err(FsError::from_io(path_dir, e)));
                    continue;
                }
            };
            let path_entry = dir_entry.path();
            let file_type = match dir_entry.file_type() {
                Ok(v) => v,
                Err(e) => {
                    l_entries.push(Err(FsError::from_io(&path_entry, e)));
                    continue;
                }
            };

            let if_is_symlink = file_type.is_symlink();
            let if_is_dir = if if_is_symlink {
                self.spec_walk_options.rule_symlink == EnumWalkSymlinkStrategy::Follow
                    && path_entry.is_dir()
            } else {
                file_type.is_dir()
            };

            let name_entry = dir_entry.file_name().to_string_lossy().to_string();
            let b_excluded = if if_is_dir {
                should_exclude_by_patterns(
                    &name_entry,
                    self.spec_walk_pats.patterns_include_dirs.as_ref(),
                    self.spec_walk_pats.patterns_exclude_dirs.as_ref(),
                )
            } else {
                should_exclude_by_patterns(
                    &name_entry,
                    self.spec_walk_pats.patterns_include_files.as_ref(),
                    self.spec_walk_pats.patterns_exclude_files.as_ref(),
                )
            };
            if b_excluded {
                continue;
            }

            l_entries.push(Ok(SpecWalkEntry {
                path: path_entry,
                depth: depth_child,
                if_is_dir,
                if_is_symlink,
            }));
        }

        l_entries.sort_by(|a, b| match (a, b) {
            (Ok(a), Ok(b)) => a.path.file_name().cmp(&b.path.file_name()),
            (Err(_), Ok(_)) => std::cmp::Ordering::Less,
            (Ok(_), Err(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });
        Ok(Some(SpecDirFrame {
            iter_entries: l_entries.into_iter(),
        }))
    }

    /// Record `path_dir` as visited; false when it was seen before.
    fn mark_visited(&mut self, path_dir: &Path) -> FsResult<bool> {
        #[cfg(unix)]
        let identity: TypeDirIdentity = {
            use std::os::unix::fs::MetadataExt;
            let stat_dir = fs::metadata(path_dir).map_err(|e| FsError::from_io(path_dir, e))?;
            (stat_dir.dev(), stat_dir.ino())
        };
        #[cfg(not(unix))]
        let identity: TypeDirIdentity =
            fs::canonicalize(path_dir).map_err(|e| FsError::from_io(path_dir, e))?;

        Ok(self.set_visited_dirs.insert(identity))
    }
}
