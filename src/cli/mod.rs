//! Command-line parsing for the S-min method selector.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the selection code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_MIN_COVERED, DEFAULT_TOP_K};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "pfp",
    version,
    about = "Select and annotate the top protein-function-prediction methods by S-min"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank methods from a curves file and a team registry.
    Select(SelectArgs),
    /// Run the selection on a synthetic benchmark.
    Demo(DemoArgs),
    /// Print the Pareto frontier of one method's curve.
    Frontier(FrontierArgs),
    /// Print a selection saved with `--export-json`.
    Show(ShowArgs),
}

/// Selection policy options shared by `select` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct PolicyArgs {
    /// Internal id of the naive baseline (default: $PFP_NAIVE_ID or BN4S).
    #[arg(long)]
    pub naive: Option<String>,

    /// Internal id of the BLAST baseline (default: $PFP_BLAST_ID or BB4S).
    #[arg(long)]
    pub blast: Option<String>,

    /// Number of methods (distinct PIs) to select.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Minimum number of covered benchmark proteins for a method to be ranked.
    #[arg(long, default_value_t = DEFAULT_MIN_COVERED)]
    pub min_covered: usize,
}

/// Export destinations shared by `select` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Write the selection (curves, optimal points, legends) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Write the ranking table to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    /// Curves JSON (array of {id, points, thresholds, coverage, covered_count}).
    #[arg(long, value_name = "JSON")]
    pub curves: PathBuf,

    /// Team registry (tab-separated, or comma-separated if `.csv`).
    #[arg(long, value_name = "FILE")]
    pub registry: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Number of synthetic methods (baselines are added on top).
    #[arg(short = 'n', long, default_value_t = 40)]
    pub methods: usize,

    /// Random seed for the synthetic benchmark.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Also write the generated curves to JSON.
    #[arg(long, value_name = "JSON")]
    pub write_curves: Option<PathBuf>,

    /// Also write the generated registry.
    #[arg(long, value_name = "FILE")]
    pub write_registry: Option<PathBuf>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FrontierArgs {
    /// Curves JSON.
    #[arg(long, value_name = "JSON")]
    pub curves: PathBuf,

    /// Method id to reduce.
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Selection JSON written by `select` or `demo`.
    #[arg(value_name = "JSON")]
    pub selection: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_parses_defaults() {
        let cli = Cli::try_parse_from([
            "pfp", "select", "--curves", "c.json", "--registry", "r.tab",
        ])
        .unwrap();
        let Command::Select(args) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.policy.top, 10);
        assert_eq!(args.policy.min_covered, 10);
        assert!(args.policy.naive.is_none());
        assert!(args.export.export_json.is_none());
    }

    #[test]
    fn demo_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "pfp", "demo", "-n", "25", "--seed", "3", "--top", "5", "--naive", "N1",
        ])
        .unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.methods, 25);
        assert_eq!(args.policy.top, 5);
        assert_eq!(args.policy.naive.as_deref(), Some("N1"));
    }

    #[test]
    fn show_takes_selection_path() {
        let cli = Cli::try_parse_from(["pfp", "show", "out/selection.json"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.selection, PathBuf::from("out/selection.json"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
