//! Exports: the selection hand-off for plotting, a CSV ranking, and writers
//! for curve / registry files (used to persist synthetic benchmarks).

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Curve, SelectConfig, Selection, TeamRegistry};
use crate::error::AppError;

/// Selection JSON as consumed by the plotting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub top_k: usize,
    pub min_covered: usize,
    pub selection: Selection,
}

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: usize,
    id: &'a str,
    group_name: &'a str,
    pi_name: &'a str,
    smin: f64,
    coverage: f64,
    opt_x: f64,
    opt_y: f64,
    opt_threshold: f64,
    legend: &'a str,
}

#[derive(Debug, Serialize)]
struct RegistryRow<'a> {
    id: &'a str,
    external_id: &'a str,
    group_name: &'a str,
    pi_name: &'a str,
    category: &'a str,
}

/// Write the selection (ranked entries, baselines, warnings) as JSON.
pub fn write_selection_json(
    path: &Path,
    selection: &Selection,
    config: &SelectConfig,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create selection JSON '{}': {e}", path.display()))
    })?;

    let out = SelectionFile {
        tool: "pfp".to_string(),
        generated_at: Utc::now(),
        top_k: config.top_k,
        min_covered: config.min_covered,
        selection: selection.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(4, format!("Failed to write selection JSON: {e}")))?;
    Ok(())
}

/// Read a selection JSON file written by `write_selection_json`.
pub fn read_selection_json(path: &Path) -> Result<SelectionFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open selection JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid selection JSON: {e}")))
}

/// Write one CSV row per ranked entry.
pub fn write_selection_csv(path: &Path, selection: &Selection) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(4, format!("Failed to create ranking CSV '{}': {e}", path.display()))
    })?;

    for (i, e) in selection.ranked.iter().enumerate() {
        writer
            .serialize(RankingRow {
                rank: i + 1,
                id: &e.id,
                group_name: &e.group_name,
                pi_name: &e.pi_name,
                smin: e.optimum_value.unwrap_or(f64::NAN),
                coverage: e.coverage,
                opt_x: e.optimal_point.x,
                opt_y: e.optimal_point.y,
                opt_threshold: e.optimal_threshold,
                legend: &e.legend_tag,
            })
            .map_err(|e| AppError::new(4, format!("Failed to write ranking CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush ranking CSV: {e}")))?;
    Ok(())
}

/// Write curves in the format read by `read_curves_json`.
pub fn write_curves_json(path: &Path, curves: &[Curve]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create curves JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer(file, curves)
        .map_err(|e| AppError::new(4, format!("Failed to write curves JSON: {e}")))?;
    Ok(())
}

/// Write a registry in the format read by `read_registry`.
///
/// Tab-separated unless the path ends in `.csv`.
pub fn write_registry(path: &Path, registry: &TeamRegistry) -> Result<(), AppError> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| {
            AppError::new(4, format!("Failed to create registry '{}': {e}", path.display()))
        })?;

    for (id, r) in registry.iter() {
        writer
            .serialize(RegistryRow {
                id,
                external_id: &r.external_id,
                group_name: &r.group_name,
                pi_name: &r.pi_name,
                category: r.category.as_str(),
            })
            .map_err(|e| AppError::new(4, format!("Failed to write registry row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush registry: {e}")))?;
    Ok(())
}
