use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::error::{FsError, FsResult};
use crate::spec::EnumPatternMode;

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypePatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecWalkPatterns {
    pub(crate) patterns_include_files: Option<TypePatternSeq>,
    pub(crate) patterns_exclude_files: Option<TypePatternSeq>,
    pub(crate) patterns_include_dirs: Option<TypePatternSeq>,
    pub(crate) patterns_exclude_dirs: Option<TypePatternSeq>,
}

impl SpecWalkPatterns {
    pub(crate) fn from_raw(
        patterns_include_files: Option<&[String]>,
        patterns_exclude_files: Option<&[String]>,
        patterns_include_dirs: Option<&[String]>,
        patterns_exclude_dirs: Option<&[String]>,
        rule_pattern: EnumPatternMode,
    ) -> FsResult<Self> {
        Ok(Self {
            patterns_include_files: _compile(patterns_include_files, rule_pattern)?,
            patterns_exclude_files: _compile(patterns_exclude_files, rule_pattern)?,
            patterns_include_dirs: _compile(patterns_include_dirs, rule_pattern)?,
            patterns_exclude_dirs: _compile(patterns_exclude_dirs, rule_pattern)?,
        })
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumPatternMode,
) -> FsResult<Option<TypePatternSeq>> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumPatternMode::Literal => Ok(Some(TypePatternSeq::Literal(patterns.to_vec()))),
        EnumPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| FsError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypePatternSeq::Glob(l_glob)))
        }
        EnumPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern).map_err(|e| FsError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                l_regex.push(regex);
            }
            Ok(Some(TypePatternSeq::Regex(l_regex)))
        }
    }
}

fn _is_pattern_matching(value: &str, patterns: &TypePatternSeq) -> bool {
    match patterns {
        TypePatternSeq::Literal(v) => v.iter().any(|p| value.contains(p.as_str())),
        TypePatternSeq::Glob(v) => v.iter().any(|p| p.is_match(value)),
        TypePatternSeq::Regex(v) => v.iter().any(|p| p.is_match(value)),
    }
}

/// An entry is kept when it matches the include list (if any) and does not
/// match the exclude list (if any).
pub(crate) fn should_exclude_by_patterns(
    value: &str,
    patterns_include: Option<&TypePatternSeq>,
    patterns_exclude: Option<&TypePatternSeq>,
) -> bool {
    let b_included = patterns_include.is_none_or(|p| _is_pattern_matching(value, p));
    let b_excluded = patterns_exclude.is_some_and(|p| _is_pattern_matching(value, p));
    !b_included || b_excluded
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

pub(crate) fn is_depth_within_limit(depth_value: usize, depth_max: Option<usize>) -> bool {
    depth_max.is_none_or(|limit| depth_value <= limit)
}

/// Canonical form of `path`, falling back to an absolute path when the entry
/// cannot be resolved.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// The destination entry itself (never its link target) is the entry
/// `path_src` names, either through its links or as the link itself.
pub(crate) fn is_same_entry(path_src: &Path, path_dst: &Path) -> bool {
    let Ok(meta_dst) = fs::symlink_metadata(path_dst) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        [fs::metadata(path_src), fs::symlink_metadata(path_src)]
            .into_iter()
            .flatten()
            .any(|meta_src| meta_src.dev() == meta_dst.dev() && meta_src.ino() == meta_dst.ino())
    }
    #[cfg(not(unix))]
    {
        if meta_dst.file_type().is_symlink() {
            return path_src == path_dst;
        }
        match (fs::canonicalize(path_src), fs::canonicalize(path_dst)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Lowercase extension of `path`, without the dot.
pub(crate) fn derive_extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Read up to `buf.len()` bytes from the head of the file, retrying short reads.
pub(crate) fn read_prefix(path: &Path, buf: &mut [u8]) -> io::Result<usize> {
    let mut file = fs::File::open(path)?;
    fill_buffer(&mut file, buf)
}

/// Fill `buf` from `reader` until it is full or EOF; returns the byte count.
pub(crate) fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n_filled = 0;
    while n_filled < buf.len() {
        match reader.read(&mut buf[n_filled..]) {
            Ok(0) => break,
            Ok(n) => n_filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(n_filled)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Metadata

/// Carry permissions and timestamps (plus Linux extended attributes) from
/// `path_src` to `path_dst`.
pub(crate) fn apply_metadata(path_src: &Path, path_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_src)?;
    fs::set_permissions(path_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_src, path_dst);
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_src: &Path, path_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_dst, &name, &raw_value) {
            tracing::debug!(
                path = %path_dst.display(),
                name = ?name,
                error = %e,
                "extended attribute not copied"
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{
        SpecWalkPatterns, derive_extension_lower, fill_buffer, is_depth_within_limit,
        should_exclude_by_patterns,
    };
    use crate::error::EnumFsErrorKind;
    use crate::spec::EnumPatternMode;

    fn compile_files(patterns: &[&str], rule_pattern: EnumPatternMode) -> SpecWalkPatterns {
        let l_patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        SpecWalkPatterns::from_raw(Some(l_patterns.as_slice()), None, None, None, rule_pattern)
            .expect("compile patterns")
    }

    #[test]
    fn include_glob_keeps_matching_names() {
        let spec_pats = compile_files(&["*.txt"], EnumPatternMode::Glob);
        let include = spec_pats.patterns_include_files.as_ref();
        assert!(!should_exclude_by_patterns("a.txt", include, None));
        assert!(should_exclude_by_patterns("a.jpg", include, None));
    }

    #[test]
    fn exclude_wins_over_include() {
        let spec_pats = SpecWalkPatterns::from_raw(
            Some(&["^f_".to_string()][..]),
            Some(&[r"\.tmp$".to_string()][..]),
            None,
            None,
            EnumPatternMode::Regex,
        )
        .expect("compile patterns");
        let include = spec_pats.patterns_include_files.as_ref();
        let exclude = spec_pats.patterns_exclude_files.as_ref();
        assert!(!should_exclude_by_patterns("f_1.txt", include, exclude));
        assert!(should_exclude_by_patterns("f_1.tmp", include, exclude));
        assert!(should_exclude_by_patterns("g_1.txt", include, exclude));
    }

    #[test]
    fn literal_mode_is_substring() {
        let spec_pats = compile_files(&["put"], EnumPatternMode::Literal);
        let include = spec_pats.patterns_include_files.as_ref();
        assert!(!should_exclude_by_patterns("exampleInput.txt", include, None));
        assert!(should_exclude_by_patterns("coffee.jpg", include, None));
    }

    #[test]
    fn invalid_patterns_rejected() {
        for (pattern, rule_pattern) in [("[", EnumPatternMode::Glob), ("(", EnumPatternMode::Regex)]
        {
            let err = SpecWalkPatterns::from_raw(
                Some(&[pattern.to_string()][..]),
                None,
                None,
                None,
                rule_pattern,
            )
            .expect_err("invalid pattern must fail");
            assert_eq!(err.kind(), EnumFsErrorKind::InvalidInput);
        }
    }

    #[test]
    fn empty_pattern_list_is_no_filter() {
        let spec_pats =
            SpecWalkPatterns::from_raw(Some(&[][..]), None, None, None, EnumPatternMode::Glob)
                .expect("compile patterns");
        assert!(spec_pats.patterns_include_files.is_none());
    }

    #[test]
    fn depth_limit() {
        assert!(is_depth_within_limit(7, None));
        assert!(is_depth_within_limit(0, Some(0)));
        assert!(!is_depth_within_limit(1, Some(0)));
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(
            derive_extension_lower(Path::new("Coffee.JPG")).as_deref(),
            Some("jpg")
        );
        assert_eq!(derive_extension_lower(Path::new("Makefile")), None);
        assert_eq!(derive_extension_lower(Path::new("trailing.")), None);
    }

    #[test]
    fn fill_buffer_coalesces_short_reads() {
        struct TrickleReader(Vec<u8>);
        impl std::io::Read for TrickleReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.0.is_empty() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.0.remove(0);
                Ok(1)
            }
        }

        let mut reader = TrickleReader(b"abcdef".to_vec());
        let mut buf = [0u8; 4];
        assert_eq!(fill_buffer(&mut reader, &mut buf).expect("fill"), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(fill_buffer(&mut reader, &mut buf).expect("fill"), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(fill_buffer(&mut reader, &mut buf).expect("fill"), 0);
    }
}
