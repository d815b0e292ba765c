use chrono::Local;
use clap::Parser;
use colored::*;
use srtmerge::config::MergeConfig;
use srtmerge::error::Result;
use srtmerge::merge::{self, CmdMessage, MessageLevel, RunOptions};
use tracing_subscriber::EnvFilter;

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let options = RunOptions {
        dry_run: cli.dry_run,
    };

    let report = merge::run(&config, options, Local::now())?;

    if let Some(text) = &report.rendered {
        print!("{}", text);
    }
    print_messages(&report.messages, cli.quiet || cli.dry_run);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<MergeConfig> {
    let mut config = match &cli.config {
        Some(path) => MergeConfig::load_file(path)?,
        None => MergeConfig::load(".")?,
    };

    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(template) = &cli.template {
        config.template = template.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if cli.flush_trailing {
        config.flush_trailing = true;
    }
    Ok(config)
}

/// When `quiet`, only warnings are printed, and on stderr, so stdout keeps just the merged text.
fn print_messages(messages: &[CmdMessage], quiet: bool) {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info if quiet => continue,
            MessageLevel::Success if quiet => continue,
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
        };
        if quiet {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
