//! CLI command definitions and handlers

mod analyze;
mod compare;
mod init;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use styleprint::config::load_engine_config;
use styleprint::reporters::OutputFormat;
use styleprint::MetricKey;

/// Parse a metric key (grade, cv, sttr, ...)
fn parse_metric(s: &str) -> Result<MetricKey, String> {
    s.parse()
}

/// Parse and validate a score threshold (0-100)
fn parse_score(s: &str) -> Result<f64, String> {
    let n: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if (0.0..=100.0).contains(&n) {
        Ok(n)
    } else {
        Err("score must be between 0 and 100".to_string())
    }
}

/// Styleprint - writing style fingerprints
///
/// Everything runs locally. Samples are read from disk and never stored.
#[derive(Parser, Debug)]
#[command(name = "styleprint")]
#[command(
    version,
    about = "Per-author writing style fingerprints and consistency scoring",
    long_about = "Styleprint builds a statistical profile from an author's own writing samples \
and scores how consistent a new document is with it: per-metric z-scores, a 0-100 \
consistency score, style-change flags and a step-by-step calculation trace.\n\n\
The signals are heuristics. They flag changes worth discussing; they do not prove authorship.",
    after_help = "\
Examples:
  styleprint analyze essay.txt                          Metrics for one document
  styleprint profile past/*.txt                         Baseline profile summary
  styleprint compare essay.txt -b past/*.txt            Consistency score and flags
  styleprint compare essay.txt -b past/*.txt --explain  Show the composite calculation
  styleprint init                                       Write an example styleprint.toml"
)]
pub struct Cli {
    /// Config file (default: ./styleprint.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example styleprint.toml
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Extract style metrics from a single document
    #[command(after_help = "\
Examples:
  styleprint analyze essay.txt                     Text report
  styleprint analyze essay.txt --format json       JSON output for scripting
  styleprint analyze essay.txt --explain grade     Show how the grade level was computed")]
    Analyze {
        /// Document to analyse
        file: PathBuf,

        /// Print the calculation trace for a metric (grade, cv, sttr, formulaic_weight, predictability)
        #[arg(long, value_parser = parse_metric)]
        explain: Option<MetricKey>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Build a baseline profile from writing samples
    Profile {
        /// Baseline samples (at least 3 recommended)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score a document against a baseline
    #[command(after_help = "\
Examples:
  styleprint compare new.txt -b a.txt b.txt c.txt               Text report
  styleprint compare new.txt -b past/*.txt --format json        JSON output
  styleprint compare new.txt -b past/*.txt --explain-metric cv  Z-score trace for one metric
  styleprint compare new.txt -b past/*.txt --fail-below 60      Exit code 1 below 60 (CI mode)")]
    Compare {
        /// Baseline samples
        #[arg(long, short = 'b', required = true, num_args = 1..)]
        baseline: Vec<PathBuf>,

        /// Document to score
        file: PathBuf,

        /// Show the composite score calculation
        #[arg(long)]
        explain: bool,

        /// Show the z-score calculation for one metric
        #[arg(long, value_parser = parse_metric)]
        explain_metric: Option<MetricKey>,

        /// Exit with code 1 when the consistency score is below this value
        #[arg(long, value_parser = parse_score)]
        fail_below: Option<f64>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),

        Commands::Analyze { file, explain, output } => {
            let config = load_engine_config(cli.config.as_deref())?;
            analyze::run(config, &file, explain, format, output.as_deref())
        }

        Commands::Profile { files, output } => {
            let config = load_engine_config(cli.config.as_deref())?;
            analyze::profile(config, &files, format, output.as_deref())
        }

        Commands::Compare {
            baseline,
            file,
            explain,
            explain_metric,
            fail_below,
            output,
        } => {
            let config = load_engine_config(cli.config.as_deref())?;
            compare::run(
                config,
                &baseline,
                &file,
                compare::CompareOptions {
                    explain,
                    explain_metric,
                    fail_below,
                },
                format,
                output.as_deref(),
            )
        }
    }
}

/// Read a document as UTF-8
pub(crate) fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print to stdout, or write to `output` when given
pub(crate) fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_bounds() {
        assert_eq!(parse_score("60"), Ok(60.0));
        assert!(parse_score("101").is_err());
        assert!(parse_score("abc").is_err());
    }

    #[test]
    fn test_compare_args() {
        let cli = Cli::try_parse_from([
            "styleprint",
            "compare",
            "-b",
            "a.txt",
            "b.txt",
            "--explain-metric",
            "cv",
            "--",
            "new.txt",
        ])
        .expect("parse");
        match cli.command {
            Commands::Compare {
                baseline,
                file,
                explain_metric,
                ..
            } => {
                assert_eq!(baseline.len(), 2);
                assert_eq!(file, PathBuf::from("new.txt"));
                assert_eq!(explain_metric, Some(MetricKey::SentenceVariation));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let parsed = Cli::try_parse_from(["styleprint", "analyze", "x.txt", "--explain", "nope"]);
        assert!(parsed.is_err());
    }
}
