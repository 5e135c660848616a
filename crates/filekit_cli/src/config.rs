use std::path::PathBuf;

use filekit_io_fs::conf::N_CHUNK_SIZE_DEFAULT;
use filekit_io_fs::{EnumWalkSymlinkStrategy, SpecWalkOptions};

use crate::args::Args;

/// Paths every demo step operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDemoPaths {
    pub path_input_text: PathBuf,
    pub path_output_text: PathBuf,
    pub path_input_binary: PathBuf,
    pub path_copied_text: PathBuf,
    pub path_copied_binary: PathBuf,
    pub path_walk_root: PathBuf,
}

pub const C_PATH_INPUT_TEXT_DEFAULT: &str = "exampleInput.txt";
pub const C_PATH_OUTPUT_TEXT_DEFAULT: &str = "exampleOutput.txt";
pub const C_PATH_INPUT_BINARY_DEFAULT: &str = "coffee.jpg";
pub const C_PATH_COPIED_TEXT_DEFAULT: &str = "copiedText.txt";
pub const C_PATH_COPIED_BINARY_DEFAULT: &str = "secondCup.jpg";
pub const C_PATH_WALK_ROOT_DEFAULT: &str = ".";

impl Default for SpecDemoPaths {
    fn default() -> Self {
        Self {
            path_input_text: PathBuf::from(C_PATH_INPUT_TEXT_DEFAULT),
            path_output_text: PathBuf::from(C_PATH_OUTPUT_TEXT_DEFAULT),
            path_input_binary: PathBuf::from(C_PATH_INPUT_BINARY_DEFAULT),
            path_copied_text: PathBuf::from(C_PATH_COPIED_TEXT_DEFAULT),
            path_copied_binary: PathBuf::from(C_PATH_COPIED_BINARY_DEFAULT),
            path_walk_root: PathBuf::from(C_PATH_WALK_ROOT_DEFAULT),
        }
    }
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct SpecDemoConfig {
    pub spec_demo_paths: SpecDemoPaths,
    pub spec_walk_options: SpecWalkOptions,
    pub n_chunk_size: usize,
    pub if_verbose: bool,
}

impl Default for SpecDemoConfig {
    fn default() -> Self {
        Self {
            spec_demo_paths: SpecDemoPaths::default(),
            spec_walk_options: SpecWalkOptions::default(),
            n_chunk_size: N_CHUNK_SIZE_DEFAULT,
            if_verbose: false,
        }
    }
}

impl From<Args> for SpecDemoConfig {
    fn from(args: Args) -> Self {
        let rule_symlink = if args.follow_symlinks {
            EnumWalkSymlinkStrategy::Follow
        } else {
            EnumWalkSymlinkStrategy::NoFollow
        };
        Self {
            spec_demo_paths: SpecDemoPaths {
                path_input_text: args.input_text,
                path_output_text: args.output_text,
                path_input_binary: args.input_binary,
                path_copied_text: args.copied_text,
                path_copied_binary: args.copied_binary,
                path_walk_root: args.walk_root,
            },
            spec_walk_options: SpecWalkOptions {
                rule_symlink,
                depth_max: args.max_depth,
                ..SpecWalkOptions::default()
            },
            n_chunk_size: args.chunk_size,
            if_verbose: args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use filekit_io_fs::EnumWalkSymlinkStrategy;

    use super::{SpecDemoConfig, SpecDemoPaths};
    use crate::args::Args;

    #[test]
    fn defaults_match_demo_file_names() {
        let args = Args::try_parse_from(["filekit"]).expect("parse");
        let spec_demo_config = SpecDemoConfig::from(args);
        assert_eq!(spec_demo_config.spec_demo_paths, SpecDemoPaths::default());
        assert_eq!(
            spec_demo_config.spec_demo_paths.path_copied_binary,
            PathBuf::from("secondCup.jpg")
        );
        assert_eq!(spec_demo_config.n_chunk_size, 1024);
        assert_eq!(
            spec_demo_config.spec_walk_options.rule_symlink,
            EnumWalkSymlinkStrategy::NoFollow
        );
        assert!(!spec_demo_config.if_verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "filekit",
            "--input-text",
            "in.txt",
            "--walk-root",
            "/tmp",
            "--max-depth",
            "2",
            "--follow-symlinks",
            "--chunk-size",
            "4096",
            "-v",
        ])
        .expect("parse");
        let spec_demo_config = SpecDemoConfig::from(args);
        assert_eq!(
            spec_demo_config.spec_demo_paths.path_input_text,
            PathBuf::from("in.txt")
        );
        assert_eq!(
            spec_demo_config.spec_demo_paths.path_walk_root,
            PathBuf::from("/tmp")
        );
        assert_eq!(spec_demo_config.spec_walk_options.depth_max, Some(2));
        assert_eq!(
            spec_demo_config.spec_walk_options.rule_symlink,
            EnumWalkSymlinkStrategy::Follow
        );
        assert_eq!(spec_demo_config.n_chunk_size, 4096);
        assert!(spec_demo_config.if_verbose);
    }
}
