//! Shared selection pipeline used by the `select` and `demo` commands.
//!
//! load (files or synthetic) -> select -> exports
//!
//! The commands then only differ in where the inputs come from.

use std::path::PathBuf;

use tracing::info;

use crate::data::{SampleBenchmark, SampleConfig, generate_benchmark};
use crate::domain::{BaselineIds, Curve, SelectConfig, TeamRegistry};
use crate::error::AppError;
use crate::io::ingest::RowError;
use crate::math::SminSolver;
use crate::select::{SelectionRun, select_top};

/// Fully resolved configuration of one selection run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub select: SelectConfig,
    pub baselines: BaselineIds,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

/// Inputs loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub curves: Vec<Curve>,
    pub registry: TeamRegistry,
    pub registry_errors: Vec<RowError>,
}

/// Load curves and registry from files.
pub fn load_inputs(
    curves: &std::path::Path,
    registry: &std::path::Path,
) -> Result<LoadedInputs, AppError> {
    let curves = crate::io::ingest::read_curves_json(curves)?;
    let ingest = crate::io::ingest::read_registry(registry)?;
    info!(
        curves = curves.len(),
        registry_rows = ingest.rows_used,
        registry_errors = ingest.row_errors.len(),
        "inputs loaded"
    );
    Ok(LoadedInputs {
        curves,
        registry: ingest.registry,
        registry_errors: ingest.row_errors,
    })
}

/// Run the selection with the default S-min solver and write any exports.
pub fn run_selection(
    curves: &[Curve],
    registry: &TeamRegistry,
    config: &RunConfig,
) -> Result<SelectionRun, AppError> {
    let run = select_top(curves, registry, &config.baselines, &SminSolver, &config.select)?;

    if let Some(path) = &config.export_json {
        crate::io::export::write_selection_json(path, &run.selection, &config.select)?;
        info!(path = %path.display(), "selection JSON written");
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_selection_csv(path, &run.selection)?;
        info!(path = %path.display(), "ranking CSV written");
    }

    Ok(run)
}

/// Generate a synthetic benchmark and run the selection on it.
pub fn run_demo(
    sample: &SampleConfig,
    config: &RunConfig,
) -> Result<(SampleBenchmark, SelectionRun), AppError> {
    let bench = generate_benchmark(sample)?;
    info!(
        methods = sample.methods,
        seed = sample.seed,
        curves = bench.curves.len(),
        "synthetic benchmark generated"
    );
    let run = run_selection(&bench.curves, &bench.registry, config)?;
    Ok((bench, run))
}
