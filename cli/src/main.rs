//! delta - convert instruction files into smem bulk-add files.

use std::env;
use std::process;

use delta_cli::{convert_file, load_config, CliArgs, USAGE};
use delta_core::DeltaConfig;
use tracing_subscriber::prelude::*;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error ({}): {}", e.kind(), e);
                process::exit(1);
            }
        },
        None => DeltaConfig::default(),
    };

    match convert_file(&cli.input, &cli.output, &config) {
        Ok(summary) => {
            if cli.verbose {
                println!(
                    "Converted {} problem-spaces, {} rules, {} prims into {}",
                    summary.contexts,
                    summary.rules,
                    summary.prims,
                    cli.output.display()
                );
            }
            if summary.unresolved > 0 {
                eprintln!(
                    "Warning: {} unreachable address(es) dropped",
                    summary.unresolved
                );
            }
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.kind(), e);
            process::exit(1);
        }
    }
}
