//! `filekit_cli`:
//! Command-line frontend over `filekit_io_fs`.
//!
//! - `args`    : clap argument model
//! - `config`  : demo paths and run configuration
//! - `demo`    : step-by-step orchestration and reporting
//! - `logging` : stderr tracing subscriber

pub mod args;
pub mod config;
pub mod demo;
pub mod logging;
