use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use filekit_cli::args::Args;
use filekit_cli::config::SpecDemoConfig;
use filekit_cli::demo::run_demo;
use filekit_cli::logging::init_logging;

fn main() -> ExitCode {
    let args = Args::parse();
    let spec_demo_config = SpecDemoConfig::from(args);
    init_logging(spec_demo_config.if_verbose);

    let mut stdout = io::stdout().lock();
    match run_demo(&spec_demo_config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = stdout.flush();
            eprintln!("IO error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
