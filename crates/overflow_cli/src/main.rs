//! Overflow CLI
//!
//! Runs headless overflow container scenarios and prints the effective
//! container configuration.

mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use overflow_app::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};
use tracing_subscriber::EnvFilter;

use config::CliConfig;

/// Headless tooling for the overflow container
#[derive(Parser, Debug)]
#[command(name = "overflow")]
#[command(about = "Run overflow container scenarios headlessly")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `overflow_widgets=trace`)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario and print its report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Logical milliseconds per frame (overrides overflow.toml)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: Option<u64>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Configuration file (defaults to ./overflow.toml if present)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Run {
            scenario,
            tick_ms,
            config,
            report,
        } => cmd_run(&scenario, tick_ms, config.as_deref(), report.as_deref()),
        Command::Config { file } => cmd_config(file.as_deref()),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_run(
    scenario_path: &Path,
    tick_ms: Option<u64>,
    config_path: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<ExitCode> {
    let config = CliConfig::discover(config_path)?;
    let scenario = HeadlessScenario::from_path(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;

    let runtime_cfg = HeadlessRunConfig {
        tick_ms: tick_ms.unwrap_or(config.run.tick_ms),
        ..Default::default()
    };
    tracing::info!(
        "running {} ({} steps, {}ms frames)",
        scenario_path.display(),
        scenario.steps.len(),
        runtime_cfg.tick_ms
    );

    let outcome = run_loaded_scenario(&scenario, runtime_cfg)?;
    let report = outcome.report();
    report.write_to_writer(&mut io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
    }

    if outcome.is_failed() {
        for failure in &report.failures {
            eprintln!(
                "step {} ({}): {}",
                failure.step_index, failure.assertion, failure.message
            );
        }
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn cmd_config(file: Option<&Path>) -> Result<ExitCode> {
    let config = CliConfig::discover(file)?;
    for warning in config.container.validate() {
        eprintln!("warning: {warning}");
    }
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_ms_must_be_positive() {
        assert!(Cli::try_parse_from(["overflow", "run", "a.json", "--tick-ms", "0"]).is_err());

        let cli = Cli::try_parse_from(["overflow", "run", "a.json", "--tick-ms", "5"]).unwrap();
        match cli.command {
            Command::Run { tick_ms, .. } => assert_eq!(tick_ms, Some(5)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
