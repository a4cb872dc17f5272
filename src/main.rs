// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use profitlens::{cli, commands, config::AppConfig, error::ReportError};

fn init_logging(matches: &clap::ArgMatches) {
    let level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let cfg = AppConfig::load(matches.get_one::<String>("config").map(Path::new))?;

    match matches.subcommand() {
        Some(("report", sub)) => commands::report::handle(&cfg, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&cfg, sub)?,
        Some(("check", sub)) => commands::check::handle(&cfg, sub)?,
        Some(("forecast", sub)) => commands::forecast::handle(&cfg, sub)?,
        Some(("export", sub)) => commands::export::handle(&cfg, sub)?,
        Some(("sales", sub)) => commands::sales::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// 2 when the input file is missing, 1 for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<ReportError>())
        .map_or(1, |e| e.exit_code() as u8)
}

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
