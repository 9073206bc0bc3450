#[path = "mailprobe-cli/args.rs"]
mod args;
#[path = "mailprobe-cli/output.rs"]
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use mailprobe_lib::{ValidateOptions, Validator};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands, load_config};

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_stdin() -> Result<Vec<String>> {
    let mut emails = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("read stdin")?;
        if !line.trim().is_empty() {
            emails.push(line);
        }
    }
    Ok(emails)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let emails = if cli.stdin {
        read_stdin()?
    } else if let Some(Commands::Validate { email }) = &cli.cmd {
        vec![email.clone()]
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    };

    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => ValidateOptions::default(),
    };
    let options = cli.apply(base)?;
    let validator = Validator::from_system_conf().context("init DNS resolver")?;

    let mut rows = Vec::with_capacity(emails.len());
    for email in &emails {
        rows.push(validator.validate(email, &options).await);
    }

    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
