use clap::Parser;
use log_digest::cli::Args;
use log_digest::config::Config;
use log_digest::digest::Digester;
use log_digest::utils;
use serde::Serialize;
use std::process;
use tracing::{error, info};

#[derive(Serialize)]
struct Summary<'a> {
    digest: &'a str,
    input_lines: usize,
    output_lines: usize,
}

fn main() {
    // Initialize logging; stdout is reserved for the digest itself
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();

    // Build configuration from CLI args
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(2);
        }
    };

    match run(&config) {
        Ok(_) => process::exit(0),
        Err(e) => {
            error!("logdigest failed: {}", e);
            process::exit(1);
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let text = utils::read_log_file(&config.file)?;

    let digester = Digester::with_context(config.context);
    let digest = digester.digest(
        &text,
        &config.error_pattern,
        &config.filters,
        |len| config.format_skip(len),
        config.objref_dict.as_ref(),
    )?;

    let input_lines = text.split('\n').count();
    let output_lines = if digest.is_empty() {
        0
    } else {
        digest.split('\n').count()
    };
    info!(input_lines, output_lines, "digest complete");

    if config.json {
        let summary = Summary {
            digest: &digest,
            input_lines,
            output_lines,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", digest);
    }

    Ok(())
}
