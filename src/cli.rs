// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forecast::MAX_HORIZON;
use crate::render::ReportVariant;
use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, Command, command};

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .value_name("PATH")
        .help("Spreadsheet with the monthly figures (xlsx, xls, ods or csv)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

pub fn build_cli() -> Command {
    command!()
        .name("profitlens")
        .about("Monthly profitability reports from a revenue/cost spreadsheet")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("JSON config file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("quiet")
                .help("Debug logging"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Only warnings and errors"),
        )
        .subcommand(
            Command::new("report")
                .about("Render an HTML report")
                .arg(input_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_name("PATH")
                        .help("Output file (default from config, reports/report.html)"),
                )
                .arg(
                    Arg::new("variant")
                        .long("variant")
                        .value_parser(ReportVariant::NAMES)
                        .default_value("standard"),
                )
                .arg(Arg::new("title").long("title").value_name("TEXT")),
        )
        .subcommand(
            Command::new("summary")
                .about("Print summary metrics")
                .arg(input_arg())
                .arg(json_arg())
                .arg(
                    Arg::new("jsonl")
                        .long("jsonl")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Run data-quality checks on the sheet")
                .arg(input_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("forecast")
                .about("Trend and revenue forecast")
                .arg(input_arg())
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(
                            RangedU64ValueParser::<usize>::new().range(1..=MAX_HORIZON as u64),
                        )
                        .help("Months to forecast, 1-120 (default from config, 6)"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Write the cleaned period table")
                .arg(input_arg())
                .arg(Arg::new("out").long("out").short('o').required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("csv or json")
                        .default_value("csv"),
                ),
        )
        .subcommand(
            Command::new("sales")
                .about("Summarize an order-level sales CSV")
                .arg(Arg::new("path").long("path").required(true))
                .arg(json_arg()),
        )
}
