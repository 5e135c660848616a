use std::path::PathBuf;

use clap::{Parser, ValueHint};
use filekit_io_fs::conf::N_CHUNK_SIZE_DEFAULT;

use crate::config::{
    C_PATH_COPIED_BINARY_DEFAULT, C_PATH_COPIED_TEXT_DEFAULT, C_PATH_INPUT_BINARY_DEFAULT,
    C_PATH_INPUT_TEXT_DEFAULT, C_PATH_OUTPUT_TEXT_DEFAULT, C_PATH_WALK_ROOT_DEFAULT,
};

#[derive(Parser, Debug)]
#[command(
    name = "filekit",
    version,
    about = "Inspect, walk, read, write and copy a fixed set of demo files"
)]
pub struct Args {
    /// Text file that is inspected, read and copied
    #[arg(long, default_value = C_PATH_INPUT_TEXT_DEFAULT, value_hint = ValueHint::FilePath, help_heading = "Files")]
    pub input_text: PathBuf,

    /// Text file that is (re)written and appended to
    #[arg(long, default_value = C_PATH_OUTPUT_TEXT_DEFAULT, value_hint = ValueHint::FilePath, help_heading = "Files")]
    pub output_text: PathBuf,

    /// Binary file that is read whole and in chunks, then copied
    #[arg(long, default_value = C_PATH_INPUT_BINARY_DEFAULT, value_hint = ValueHint::FilePath, help_heading = "Files")]
    pub input_binary: PathBuf,

    /// Copy destination for the text file
    #[arg(long, default_value = C_PATH_COPIED_TEXT_DEFAULT, value_hint = ValueHint::FilePath, help_heading = "Files")]
    pub copied_text: PathBuf,

    /// Copy destination for the binary file
    #[arg(long, default_value = C_PATH_COPIED_BINARY_DEFAULT, value_hint = ValueHint::FilePath, help_heading = "Files")]
    pub copied_binary: PathBuf,

    /// Directory whose tree is listed
    #[arg(long, default_value = C_PATH_WALK_ROOT_DEFAULT, value_hint = ValueHint::DirPath, help_heading = "Walk")]
    pub walk_root: PathBuf,

    /// Deepest level listed below the walk root
    #[arg(long, help_heading = "Walk")]
    pub max_depth: Option<usize>,

    /// Descend into directories reached through symbolic links
    #[arg(long, help_heading = "Walk")]
    pub follow_symlinks: bool,

    /// Buffer size for the chunked binary read
    #[arg(long, default_value_t = N_CHUNK_SIZE_DEFAULT, help_heading = "Behavior")]
    pub chunk_size: usize,

    /// Emit debug logs on stderr (overrides RUST_LOG)
    #[arg(short, long, help_heading = "Behavior")]
    pub verbose: bool,
}
