//! cashflow-report CLI
//!
//! Print daily cashflow summaries and counterparty rankings for a trade feed.
//!
//! # Usage
//!
//! ```bash
//! # Report on the built-in sample feed
//! cashflow-report
//!
//! # Report on a feed file
//! cashflow-report report --input trades.csv
//!
//! # Output as JSON
//! cashflow-report report --input trades.csv --format json
//!
//! # Generate a random feed for testing
//! cashflow-report generate --rows 500 --entities 20
//! ```

use cashflow_report::input::sample::{generate_random_feed, FeedConfig, SAMPLE_FEED};
use cashflow_report::report::config::ReportConfig;
use cashflow_report::report::engine::ReportEngine;
use cashflow_report::report::output::ConsoleOutput;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"cashflow-report: daily cashflow and counterparty ranking reports

USAGE:
    cashflow-report [COMMAND] [OPTIONS]

COMMANDS:
    report      Print the daily summary and both rankings (default)
    generate    Generate a random trade feed (for testing)
    help        Show this message

OPTIONS (report):
    --input <FILE>      Trade feed to read (default: built-in sample)
    --format <FORMAT>   Output format: text (default) or json
    --width <N>         Column width for text output (default: 20)

OPTIONS (generate):
    --rows <N>          Number of trades (default: 100)
    --entities <N>      Number of counterparties (default: 10)
    --output <FILE>     Write to file instead of stdout

FEED FORMAT (one trade per line):
    entity,S|B,agreed_fx,currency,trade_date,settlement_date,units,price_per_unit
    foo,B,0.50,SGP,01 Jan 2016,02 Jan 2016,200,100.25

Set RUST_LOG=debug to see why individual lines were dropped."#
    );
}

/// Read the value following a flag, or exit with `message`.
fn flag_value(args: &[String], i: usize, message: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{}", message);
        process::exit(1);
    })
}

fn cmd_report(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut config = ReportConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(flag_value(args, i, "--input requires a file path"));
            }
            "--format" => {
                i += 1;
                format = flag_value(args, i, "--format requires 'text' or 'json'");
            }
            "--width" => {
                i += 1;
                let width = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--width requires a number");
                        process::exit(1);
                    });
                config = config.with_column_width(width);
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let builder = ReportEngine::builder().sink(ConsoleOutput::new()).config(config);
    let builder = match input_path {
        Some(path) => builder.input_file(&path).unwrap_or_else(|e| {
            eprintln!("Error reading '{}': {}", path, e);
            process::exit(1);
        }),
        None => builder.input(SAMPLE_FEED),
    };
    let mut engine = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match format.as_str() {
        "text" => engine.print_all(),
        "json" => {
            let json = serde_json::to_string_pretty(&engine.snapshot()).unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Unknown format '{}': expected 'text' or 'json'", other);
            process::exit(1);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = FeedConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                config.rows = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--rows requires a number");
                        process::exit(1);
                    });
            }
            "--entities" => {
                i += 1;
                config.entity_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--entities requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output requires a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let feed = generate_random_feed(&config);

    if let Some(path) = output_path {
        fs::write(&path, &feed).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} trades across {} entities → {}",
            config.rows, config.entity_count, path
        );
    } else {
        println!("{}", feed);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        cmd_report(&[]);
        return;
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
