//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - loaded from curve / registry files
//! - passed through the selection engine
//! - exported to JSON/CSV for the plotting layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectError;

/// Number of methods shown in the comparison plot.
pub const DEFAULT_TOP_K: usize = 10;

/// Minimum number of covered benchmark items for a method to be ranked.
pub const DEFAULT_MIN_COVERED: usize = 10;

/// Default internal id of the naive (term-frequency) baseline.
pub const DEFAULT_NAIVE_ID: &str = "BN4S";

/// Default internal id of the BLAST (sequence-similarity) baseline.
pub const DEFAULT_BLAST_ID: &str = "BB4S";

/// One point on a remaining-uncertainty / misinformation curve.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    /// Remaining uncertainty (under-prediction cost).
    pub x: f64,
    /// Misinformation (over-prediction cost).
    pub y: f64,
}

impl Point {
    pub const UNDEFINED: Point = Point {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A per-method curve indexed by decision threshold.
///
/// Points are in threshold order, not sorted by either coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub id: String,
    pub points: Vec<Point>,
    pub thresholds: Vec<f64>,
    /// Fraction of the benchmark with at least one prediction.
    pub coverage: f64,
    /// Number of benchmark items actually covered.
    pub covered_count: usize,
}

impl Curve {
    /// Build a curve, rejecting point/threshold length mismatches.
    pub fn new(
        id: impl Into<String>,
        points: Vec<Point>,
        thresholds: Vec<f64>,
        coverage: f64,
        covered_count: usize,
    ) -> Result<Self, SelectError> {
        let curve = Self {
            id: id.into(),
            points,
            thresholds,
            coverage,
            covered_count,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<(), SelectError> {
        if self.points.len() != self.thresholds.len() {
            return Err(SelectError::MalformedCurve {
                id: self.id.clone(),
                points: self.points.len(),
                thresholds: self.thresholds.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Qualification category from the team registry.
///
/// Closed set: anything that is neither a baseline nor qualified is ignored
/// by the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Qualified,
    Disqualified,
    NaiveBaseline,
    BlastBaseline,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Qualified => "qualified",
            Category::Disqualified => "disqualified",
            Category::NaiveBaseline => "naive-baseline",
            Category::BlastBaseline => "blast-baseline",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qualified" | "q" => Ok(Category::Qualified),
            "disqualified" | "x" | "d" => Ok(Category::Disqualified),
            "naive-baseline" | "naive" | "n" => Ok(Category::NaiveBaseline),
            "blast-baseline" | "blast" | "b" => Ok(Category::BlastBaseline),
            other => Err(format!("Unknown category '{other}'.")),
        }
    }
}

/// Registry entry for one internal method id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub group_name: String,
    pub pi_name: String,
    /// External submission id, e.g. `T100-2` (team 100, model 2).
    pub external_id: String,
    pub category: Category,
}

impl TeamRecord {
    /// Model variant: the second `-`-separated token of the external id.
    ///
    /// Returns `None` when the token is missing or empty.
    pub fn model_variant(&self) -> Option<&str> {
        self.external_id
            .split('-')
            .nth(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The two reference methods always shown next to the ranked entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineIds {
    pub naive: String,
    pub blast: String,
}

impl Default for BaselineIds {
    fn default() -> Self {
        Self {
            naive: DEFAULT_NAIVE_ID.to_string(),
            blast: DEFAULT_BLAST_ID.to_string(),
        }
    }
}

/// Baseline slot names (slot 1 = naive, slot 2 = blast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineSlot {
    Naive,
    Blast,
}

impl BaselineSlot {
    pub fn display_name(self) -> &'static str {
        match self {
            BaselineSlot::Naive => "naive",
            BaselineSlot::Blast => "blast",
        }
    }
}

/// Selection policy knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    pub top_k: usize,
    pub min_covered: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_covered: DEFAULT_MIN_COVERED,
        }
    }
}

/// Output of the optimum solver for one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    pub value: f64,
    pub point: Point,
    pub threshold: f64,
}

impl Optimum {
    pub const UNDEFINED: Optimum = Optimum {
        value: f64::NAN,
        point: Point::UNDEFINED,
        threshold: f64::NAN,
    };

    pub fn is_defined(&self) -> bool {
        !self.value.is_nan()
    }
}

/// One curve as it should be drawn: points, optimum marker, legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: String,
    pub points: Vec<Point>,
    /// `null` in JSON when the curve has no defined optimum.
    #[serde(with = "nan_as_null::point")]
    pub optimal_point: Point,
    #[serde(with = "nan_as_null::threshold")]
    pub optimal_threshold: f64,
    pub legend_tag: String,
    pub group_name: String,
    pub pi_name: String,
    pub coverage: f64,
    /// S-min used for ranking. Not used to order baselines.
    pub optimum_value: Option<f64>,
}

/// Non-fatal conditions reported alongside a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectWarning {
    /// Fewer distinct PIs qualified than requested.
    UnderSelected { selected: usize, wanted: usize },
    /// No input curve (with registry metadata) matched a baseline id.
    MissingBaseline { slot: BaselineSlot, id: String },
}

impl fmt::Display for SelectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectWarning::UnderSelected { selected, wanted } => {
                write!(f, "only {selected} of {wanted} methods selected")
            }
            SelectWarning::MissingBaseline { slot, id } => {
                write!(f, "{} baseline '{id}' not available", slot.display_name())
            }
        }
    }
}

/// Result of one selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Ranked entries, best (lowest S-min) first, one per PI.
    pub ranked: Vec<SelectionEntry>,
    pub naive: Option<SelectionEntry>,
    pub blast: Option<SelectionEntry>,
    pub warnings: Vec<SelectWarning>,
}

impl Selection {
    pub fn baseline(&self, slot: BaselineSlot) -> Option<&SelectionEntry> {
        match slot {
            BaselineSlot::Naive => self.naive.as_ref(),
            BaselineSlot::Blast => self.blast.as_ref(),
        }
    }

    /// Number of selected entries if fewer than requested were found.
    pub fn under_selected(&self) -> Option<usize> {
        self.warnings.iter().find_map(|w| match w {
            SelectWarning::UnderSelected { selected, .. } => Some(*selected),
            _ => None,
        })
    }
}

/// Serde adapters writing an undefined (NaN) optimum as `null` and reading
/// `null` back as NaN.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point;

    pub mod point {
        use super::*;

        pub fn serialize<S: Serializer>(p: &Point, s: S) -> Result<S::Ok, S::Error> {
            let defined = !(p.x.is_nan() || p.y.is_nan());
            defined.then_some(*p).serialize(s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Point, D::Error> {
            Ok(Option::<Point>::deserialize(d)?.unwrap_or(Point::UNDEFINED))
        }
    }

    pub mod threshold {
        use super::*;

        pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
            (!v.is_nan()).then_some(*v).serialize(s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
            Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
        }
    }
}
