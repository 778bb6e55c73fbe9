//! Per-curve classification: baseline slot, ranking candidate, or skipped.
//!
//! Classification of one curve never looks at any other curve, so the engine
//! can run it in parallel. Ranking happens afterwards.

use crate::domain::{
    BaselineIds, BaselineSlot, Category, Curve, SelectConfig, SelectionEntry, TeamRegistry,
};
use crate::math::OptimumSolver;
use crate::select::preprocess::strip_null_threshold;

/// Why a curve did not make it into the candidate set.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No registry record for the curve id.
    Unmatched,
    /// Registered, but neither qualified nor a designated baseline.
    NotQualified(Category),
    /// Coverage is exactly zero.
    NoCoverage,
    /// Fewer covered items than the configured minimum.
    TooFewCovered(usize),
    /// The solver could not produce an optimum.
    UndefinedOptimum,
    /// External id has no model variant token.
    MalformedExternalId(String),
}

/// A qualified curve that passed every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position in the input; breaks ranking ties.
    pub index: usize,
    pub optimum: f64,
    pub entry: SelectionEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Baseline {
        slot: BaselineSlot,
        entry: SelectionEntry,
    },
    Candidate(Candidate),
    Skipped(SkipReason),
}

/// Classify a single curve.
///
/// Steps, in order:
/// 1. strip the tau = 0 point
/// 2. resolve registry metadata (unmatched ids are skipped)
/// 3. baseline ids take their slot regardless of category or coverage
/// 4. non-qualified categories are skipped
/// 5. filters: zero coverage, too few covered items, undefined optimum
/// 6. build the legend from the model variant of the external id
pub fn classify<S: OptimumSolver + ?Sized>(
    index: usize,
    curve: &Curve,
    registry: &TeamRegistry,
    baselines: &BaselineIds,
    solver: &S,
    config: &SelectConfig,
) -> Classified {
    let curve = strip_null_threshold(curve);

    let Some(record) = registry.get(&curve.id) else {
        return Classified::Skipped(SkipReason::Unmatched);
    };

    let slot = if curve.id == baselines.naive {
        Some(BaselineSlot::Naive)
    } else if curve.id == baselines.blast {
        Some(BaselineSlot::Blast)
    } else {
        None
    };

    if let Some(slot) = slot {
        let opt = solver.solve(&curve.points, &curve.thresholds);
        let legend_tag = format!(
            "{} (S={:.2},C={:.2})",
            record.group_name, opt.value, curve.coverage
        );
        let entry = SelectionEntry {
            id: curve.id,
            points: curve.points,
            optimal_point: opt.point,
            optimal_threshold: opt.threshold,
            legend_tag,
            group_name: record.group_name.clone(),
            pi_name: record.pi_name.clone(),
            coverage: curve.coverage,
            optimum_value: None,
        };
        return Classified::Baseline { slot, entry };
    }

    if record.category != Category::Qualified {
        return Classified::Skipped(SkipReason::NotQualified(record.category));
    }

    if curve.coverage == 0.0 {
        return Classified::Skipped(SkipReason::NoCoverage);
    }
    if curve.covered_count < config.min_covered {
        return Classified::Skipped(SkipReason::TooFewCovered(curve.covered_count));
    }

    let opt = solver.solve(&curve.points, &curve.thresholds);
    if !opt.is_defined() {
        return Classified::Skipped(SkipReason::UndefinedOptimum);
    }

    let Some(variant) = record.model_variant() else {
        return Classified::Skipped(SkipReason::MalformedExternalId(record.external_id.clone()));
    };

    let legend_tag = format!(
        "{}-{} (S={:.2},C={:.2})",
        record.group_name, variant, opt.value, curve.coverage
    );

    Classified::Candidate(Candidate {
        index,
        optimum: opt.value,
        entry: SelectionEntry {
            id: curve.id,
            points: curve.points,
            optimal_point: opt.point,
            optimal_threshold: opt.threshold,
            legend_tag,
            group_name: record.group_name.clone(),
            pi_name: record.pi_name.clone(),
            coverage: curve.coverage,
            optimum_value: Some(opt.value),
        },
    })
}
