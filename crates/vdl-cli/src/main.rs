//! # vdl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity maps to a tracing `EnvFilter`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vdl_cli::generate::{run_generate, GenerateArgs};
use vdl_cli::run::{run_suite, RunArgs};

/// VDL interop harness
///
/// Drives verifiable driver's license issuers and verifiers through
/// issue/verify cycles and renders an interop matrix report.
#[derive(Parser, Debug)]
#[command(name = "vdl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base directory for the conventional credentials/implementations/
    /// reports layout. Defaults to the working directory.
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the per-state credential fixture files.
    Generate(GenerateArgs),

    /// Run the interop suite and write the matrix report.
    Run(RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base = cli.base_dir.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args, &base),
        Commands::Run(args) => run_suite(&args, &base),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate() {
        let cli = Cli::try_parse_from(["vdl", "generate"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn parse_generate_with_output() {
        let cli = Cli::try_parse_from(["vdl", "generate", "--output", "/tmp/fixtures"]).unwrap();
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("/tmp/fixtures")));
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(["vdl", "run"]).unwrap();
        if let Commands::Run(args) = cli.command {
            assert!(args.fixtures.is_none());
            assert!(args.allow.is_empty());
            assert_eq!(args.timeout_secs, 30);
        } else {
            panic!("expected run");
        }
    }

    #[test]
    fn parse_run_with_allow_list() {
        let cli = Cli::try_parse_from([
            "vdl",
            "run",
            "--allow",
            "Digital Bazaar",
            "--allow",
            "Mattr Labs",
            "--timeout-secs",
            "10",
        ])
        .unwrap();
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.allow, vec!["Digital Bazaar", "Mattr Labs"]);
            assert_eq!(args.timeout_secs, 10);
        } else {
            panic!("expected run");
        }
    }

    #[test]
    fn parse_run_with_paths() {
        let cli = Cli::try_parse_from([
            "vdl",
            "run",
            "--fixtures",
            "fixtures/",
            "--implementations",
            "impls.json",
            "--report-dir",
            "out/",
        ])
        .unwrap();
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.fixtures, Some(PathBuf::from("fixtures/")));
            assert_eq!(args.implementations, Some(PathBuf::from("impls.json")));
            assert_eq!(args.report_dir, Some(PathBuf::from("out/")));
        } else {
            panic!("expected run");
        }
    }

    #[test]
    fn parse_verbose_levels() {
        assert_eq!(Cli::try_parse_from(["vdl", "run"]).unwrap().verbose, 0);
        assert_eq!(Cli::try_parse_from(["vdl", "-vv", "run"]).unwrap().verbose, 2);
    }

    #[test]
    fn no_subcommand_errors() {
        assert!(Cli::try_parse_from(["vdl"]).is_err());
    }
}
