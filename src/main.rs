mod analyzer;
mod cli;
mod cli_help;
mod config;
mod css;
mod detector;
mod error;
mod report;
mod report_helpers;
mod walk;

use std::path::Path;

use clap::Parser;
use tracing::Level;

use analyzer::RunOptions;
use cli::Cli;
use config::Config;

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let cfg = match Config::resolve(cli.config.as_deref(), Path::new(".")) {
        Ok(cfg) => cfg.apply(cli.overrides()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let opts = RunOptions {
        json: cli.json,
        write: !cli.no_write,
    };
    if let Err(err) = analyzer::run(&cfg, opts) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
