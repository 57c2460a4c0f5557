use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tdd_config::{ColorChoice, Config, ConfigLoader};
use tdd_runtime::{registry, reset_output, run_registered, run_tests_with, set_output, RunOptions};
use tracing_subscriber::EnvFilter;

mod selftest;

/// Self-test runner for the TDD framework.
///
/// Registers the framework's own confirmation and suite tests, runs them,
/// and exits with the number of failed tests.
///
/// EXAMPLES:
///     tdd-selftest                  Run every self test
///     tdd-selftest --list           Show registered suites and tests
///     tdd-selftest --json           Print the run report as JSON
///     tdd-selftest --color never    Plain output
///
/// ENVIRONMENT VARIABLES:
///     TDD_COLOR         auto, always or never
///     TDD_QUIET_PANICS  Set to '0' to keep the panic hook during runs
///     NO_COLOR          Set to disable colored output
///     RUST_LOG          Diagnostic log filter (stderr)
#[derive(Parser)]
#[command(name = "tdd-selftest")]
#[command(version)]
struct Cli {
    /// Configuration file to use instead of searching for tdd.toml
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    /// When to colour verdicts (auto, always, never)
    #[arg(long)]
    color: Option<ColorChoice>,
    /// Print the run report as JSON instead of status lines
    #[arg(long, env = "TDD_JSON")]
    json: bool,
    /// List registered suites and tests without running them
    #[arg(long)]
    list: bool,
    /// Increase diagnostic logging (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let mut options = RunOptions::from_config(&config);
    if let Some(color) = cli.color {
        options = options.with_color(color);
    }

    selftest::register_all();

    if cli.list {
        list_tests(&mut io::stdout().lock())?;
        return Ok(());
    }

    let failed = if cli.json {
        run_json(&options)?
    } else {
        run_tests_with(&options)
    };

    std::process::exit(exit_status(failed));
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            loader
                .load_from_directory(&cwd)
                .context("failed to load tdd.toml")
        }
    }
}

/// Run with the status lines discarded and print the report as JSON
fn run_json(options: &RunOptions) -> Result<usize> {
    set_output(Box::new(io::sink()));
    let result = run_registered(options);
    reset_output();

    match result {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.exit_code())
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(err.exit_code())
        }
    }
}

fn list_tests(out: &mut impl Write) -> io::Result<()> {
    let registry = registry::global();
    for (suite, tests) in registry.iter() {
        let label = if suite.is_empty() { "Single Tests" } else { suite };
        writeln!(out, "{}", label)?;
        for test in tests {
            writeln!(out, "    {}", test.name())?;
        }
    }
    writeln!(
        out,
        "{} tests in {} suites",
        registry.test_count(),
        registry.suite_count()
    )
}

/// Exit status for a failure count, saturating so it never wraps to success
fn exit_status(failed: usize) -> i32 {
    failed.min(255) as i32
}
