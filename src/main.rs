//! Ignoreset CLI - Check paths against gitignore-style exclusion rulesets

use clap::{Parser, Subcommand};
use ignoreset::expectations;
use ignoreset::Ruleset;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ignoreset")]
#[command(version = "0.0.1")]
#[command(about = "Gitignore-style exclusion rulesets - ordered glob rules with last-match-wins semantics")]
#[command(long_about = r#"
Ignoreset evaluates relative paths against an ordered ruleset file:
  • Plain patterns exclude the paths they match
  • !-prefixed patterns re-include them
  • The last applicable rule wins

Example usage:
  ignoreset check --file .projectignore src/main.rs target/debug/app
  ignoreset test --file rules.ruleset
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check which of the given paths a ruleset file excludes
    Check {
        /// Path to the ruleset file
        #[arg(short, long)]
        file: PathBuf,

        /// Relative paths to check (no leading slash)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run the expectation directives embedded in a ruleset file
    Test {
        /// Path to the ruleset file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Exclusion decision for one queried path
#[derive(Serialize)]
struct PathDecision {
    path: String,
    excluded: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { file, paths, format } => {
            let ruleset = Ruleset::from_file(&file)?;
            tracing::debug!("loaded {} rules from {}", ruleset.len(), file.display());

            let mut decisions = Vec::new();
            for path in paths {
                let excluded = ruleset.is_excluded(&path)?;
                decisions.push(PathDecision { path, excluded });
            }

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&decisions)?);
            } else {
                for decision in &decisions {
                    if decision.excluded {
                        println!("{} {}", "excluded".red(), decision.path);
                    } else {
                        println!("{} {}", "included".green(), decision.path);
                    }
                }
            }
        }

        Commands::Test { file, format } => {
            let text = std::fs::read_to_string(&file)?;
            let report = expectations::verify(&text)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("🧪 Checking {} expectations in {}", report.total(), file.display());
                for failure in &report.failures {
                    let expected = if failure.expected_excluded { "excluded" } else { "included" };
                    let actual = if failure.actual_excluded { "excluded" } else { "included" };
                    println!(
                        "❌ {} (expected {}, got {})",
                        failure.path.red(),
                        expected,
                        actual
                    );
                }
                if report.is_success() {
                    println!("✅ All {} expectations passed", report.passed.green());
                }
            }

            if !report.is_success() {
                anyhow::bail!(
                    "{} of {} expectations failed",
                    report.failures.len(),
                    report.total()
                );
            }
        }
    }

    Ok(())
}
