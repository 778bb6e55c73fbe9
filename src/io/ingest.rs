//! Curve and registry ingest.
//!
//! - Curves: a JSON array of `Curve` objects (`points` as `[x, y]` pairs).
//! - Registry: delimited text with a header row. Tab-separated by default,
//!   comma-separated when the file ends in `.csv`.
//!
//! Registry rows are validated individually: bad rows are reported and
//! skipped, the rest of the file is still used.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{Category, Curve, TeamRecord, TeamRegistry};
use crate::error::AppError;

const REGISTRY_COLUMNS: [&str; 5] = ["id", "external_id", "group_name", "pi_name", "category"];

/// A row-level error encountered during registry ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Registry ingest output: the registry plus what was skipped.
#[derive(Debug, Clone)]
pub struct RegistryIngest {
    pub registry: TeamRegistry,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Read and validate a curves JSON file.
pub fn read_curves_json(path: &Path) -> Result<Vec<Curve>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open curves JSON '{}': {e}", path.display()))
    })?;
    let curves: Vec<Curve> = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid curves JSON: {e}")))?;

    for curve in &curves {
        curve.validate()?;
    }
    if curves.is_empty() {
        return Err(AppError::new(3, format!("No curves in '{}'.", path.display())));
    }

    debug!(path = %path.display(), curves = curves.len(), "loaded curves");
    Ok(curves)
}

/// Read the team registry.
pub fn read_registry(path: &Path) -> Result<RegistryIngest, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open registry '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(registry_delimiter(path))
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read registry headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in REGISTRY_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required registry column: `{name}`")));
        }
    }

    let mut registry = TeamRegistry::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("Registry parse error: {e}"),
                });
                continue;
            }
        };

        match parse_registry_row(&record, &header_map) {
            Ok((id, team)) => {
                if registry.insert(id.clone(), team).is_some() {
                    row_errors.push(RowError {
                        line,
                        id: Some(id),
                        message: "Duplicate id; later row replaces earlier one.".to_string(),
                    });
                }
            }
            Err(message) => row_errors.push(RowError {
                line,
                id: get_optional(&record, &header_map, "id").map(str::to_string),
                message,
            }),
        }
    }

    if !row_errors.is_empty() {
        warn!(errors = row_errors.len(), path = %path.display(), "registry rows with problems");
    }

    let rows_used = registry.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows in team registry."));
    }

    Ok(RegistryIngest {
        registry,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn registry_delimiter(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_registry_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<(String, TeamRecord), String> {
    let id = get_required(record, header_map, "id")?.to_string();
    let external_id = get_required(record, header_map, "external_id")?.to_string();
    let group_name = get_required(record, header_map, "group_name")?.to_string();
    let pi_name = get_required(record, header_map, "pi_name")?.to_string();
    let category: Category = get_required(record, header_map, "category")?.parse()?;

    Ok((
        id,
        TeamRecord {
            group_name,
            pi_name,
            external_id,
            category,
        },
    ))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}
