//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - loads curves + registry (or generates a synthetic benchmark)
//! - runs the selection
//! - prints the report and writes optional exports

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, DemoArgs, ExportArgs, FrontierArgs, PolicyArgs, SelectArgs, ShowArgs};
use crate::data::SampleConfig;
use crate::domain::{BaselineIds, DEFAULT_BLAST_ID, DEFAULT_NAIVE_ID, SelectConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunConfig;

/// Environment variable overriding the default naive baseline id.
pub const NAIVE_ID_ENV: &str = "PFP_NAIVE_ID";

/// Environment variable overriding the default BLAST baseline id.
pub const BLAST_ID_ENV: &str = "PFP_BLAST_ID";

/// Entry point for the `pfp` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Select(args) => handle_select(args),
        Command::Demo(args) => handle_demo(args),
        Command::Frontier(args) => handle_frontier(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.policy, &args.export);
    let inputs = pipeline::load_inputs(&args.curves, &args.registry)?;
    for e in &inputs.registry_errors {
        warn!(
            line = e.line,
            id = e.id.as_deref().unwrap_or("-"),
            "registry row skipped: {}",
            e.message
        );
    }

    let run = pipeline::run_selection(&inputs.curves, &inputs.registry, &config)?;
    println!("{}", crate::report::format_selection(&run.selection, &run.stats));
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.policy, &args.export);
    let sample = SampleConfig {
        methods: args.methods,
        seed: args.seed,
        baselines: config.baselines.clone(),
    };

    let (bench, run) = pipeline::run_demo(&sample, &config)?;
    if let Some(path) = &args.write_curves {
        crate::io::export::write_curves_json(path, &bench.curves)?;
    }
    if let Some(path) = &args.write_registry {
        crate::io::export::write_registry(path, &bench.registry)?;
    }

    println!("{}", crate::report::format_selection(&run.selection, &run.stats));
    Ok(())
}

fn handle_frontier(args: FrontierArgs) -> Result<(), AppError> {
    let curves = crate::io::ingest::read_curves_json(&args.curves)?;
    let curve = curves
        .iter()
        .find(|c| c.id == args.id)
        .ok_or_else(|| AppError::new(3, format!("No curve with id '{}'.", args.id)))?;

    let stripped = crate::select::strip_null_threshold(curve);
    let (points, thresholds) = crate::math::reduce(&stripped.points, &stripped.thresholds);

    println!(
        "{}",
        crate::report::format_frontier(&curve.id, &points, &thresholds, stripped.points.len())
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::export::read_selection_json(&args.selection)?;
    println!("{}", crate::report::format_saved_selection(&file));
    Ok(())
}

pub fn run_config_from_args(policy: &PolicyArgs, export: &ExportArgs) -> RunConfig {
    RunConfig {
        select: SelectConfig {
            top_k: policy.top,
            min_covered: policy.min_covered,
        },
        baselines: resolve_baselines(
            policy.naive.as_deref(),
            policy.blast.as_deref(),
            |key| std::env::var(key).ok(),
        ),
        export_json: export.export_json.clone(),
        export_csv: export.export_csv.clone(),
    }
}

/// Baseline ids: CLI flag, then environment, then built-in default.
fn resolve_baselines(
    naive: Option<&str>,
    blast: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> BaselineIds {
    let pick = |flag: Option<&str>, key: &str, default: &str| {
        flag.map(str::to_string)
            .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| default.to_string())
    };
    BaselineIds {
        naive: pick(naive, NAIVE_ID_ENV, DEFAULT_NAIVE_ID),
        blast: pick(blast, BLAST_ID_ENV, DEFAULT_BLAST_ID),
    }
}
