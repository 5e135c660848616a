use std::io;

use tracing_subscriber::EnvFilter;

const C_FILTER_DEFAULT: &str = "warn";
const C_FILTER_VERBOSE: &str = "warn,filekit_io_fs=debug,filekit_cli=debug";

/// Install the stderr subscriber. `--verbose` wins over `RUST_LOG`; without
/// either only warnings are shown. A second call is a no-op.
pub fn init_logging(if_verbose: bool) {
    let env_filter = if if_verbose {
        EnvFilter::new(C_FILTER_VERBOSE)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(C_FILTER_DEFAULT))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
