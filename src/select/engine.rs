//! Top-K selection of benchmark methods by S-min.
//!
//! Selection rules:
//! 1. Validate inputs (non-empty curves, baseline ids, registry).
//! 2. Classify every curve (parallel, order-preserving).
//! 3. Fill the two baseline slots; the first matching curve wins.
//! 4. Sort candidates by S-min ascending; ties keep input order.
//! 5. Walk the ranking and keep a method only if its PI is not yet selected.
//!    The key is the PI, not the group: one PI with several group names or
//!    submissions is still shown once.
//! 6. Stop at `top_k`. Fewer is a warning, not an error.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{
    BaselineIds, BaselineSlot, Curve, SelectConfig, SelectWarning, Selection, SelectionEntry,
    TeamRegistry,
};
use crate::error::SelectError;
use crate::math::OptimumSolver;
use crate::select::classify::{Candidate, Classified, SkipReason, classify};

/// Per-run counters, for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectStats {
    pub curves: usize,
    pub baselines: usize,
    pub duplicate_baselines: usize,
    pub unmatched: usize,
    pub not_qualified: usize,
    pub no_coverage: usize,
    pub too_few_covered: usize,
    pub undefined_optimum: usize,
    pub malformed_external_id: usize,
    pub candidates: usize,
    /// Candidates dropped because their PI was already selected.
    pub same_pi: usize,
    pub selected: usize,
}

impl SelectStats {
    fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Unmatched => self.unmatched += 1,
            SkipReason::NotQualified(_) => self.not_qualified += 1,
            SkipReason::NoCoverage => self.no_coverage += 1,
            SkipReason::TooFewCovered(_) => self.too_few_covered += 1,
            SkipReason::UndefinedOptimum => self.undefined_optimum += 1,
            SkipReason::MalformedExternalId(_) => self.malformed_external_id += 1,
        }
    }
}

/// Output of `select_top`.
#[derive(Debug, Clone)]
pub struct SelectionRun {
    pub selection: Selection,
    pub stats: SelectStats,
}

/// Select the top methods (one per PI) plus the two baselines.
///
/// # Arguments
/// - `curves`: one curve per method, in input order (used for tie-breaks)
/// - `registry`: team metadata by internal id
/// - `baselines`: naive / blast baseline ids
/// - `solver`: turns a preprocessed curve into its optimum
/// - `config`: top-K size and minimum covered count
pub fn select_top<S: OptimumSolver + ?Sized>(
    curves: &[Curve],
    registry: &TeamRegistry,
    baselines: &BaselineIds,
    solver: &S,
    config: &SelectConfig,
) -> Result<SelectionRun, SelectError> {
    validate_inputs(curves, registry, baselines, config)?;

    let classified: Vec<(usize, Classified)> = curves
        .par_iter()
        .enumerate()
        .map(|(index, curve)| {
            (
                index,
                classify(index, curve, registry, baselines, solver, config),
            )
        })
        .collect();

    let mut stats = SelectStats {
        curves: curves.len(),
        ..SelectStats::default()
    };
    let mut naive: Option<SelectionEntry> = None;
    let mut blast: Option<SelectionEntry> = None;
    let mut candidates: Vec<Candidate> = Vec::new();

    for (index, outcome) in classified {
        match outcome {
            Classified::Baseline { slot, entry } => {
                let target = match slot {
                    BaselineSlot::Naive => &mut naive,
                    BaselineSlot::Blast => &mut blast,
                };
                if target.is_some() {
                    stats.duplicate_baselines += 1;
                    debug!(index, id = %entry.id, "ignoring repeated baseline curve");
                } else {
                    stats.baselines += 1;
                    *target = Some(entry);
                }
            }
            Classified::Candidate(c) => candidates.push(c),
            Classified::Skipped(reason) => {
                debug!(index, id = %curves[index].id, ?reason, "curve skipped");
                stats.record_skip(&reason);
            }
        }
    }

    stats.candidates = candidates.len();
    let (ranked, same_pi) = rank_by_pi(candidates, config.top_k);
    stats.same_pi = same_pi;
    stats.selected = ranked.len();

    let mut warnings = Vec::new();
    if ranked.len() < config.top_k {
        warn!(
            selected = ranked.len(),
            wanted = config.top_k,
            "fewer qualifying PIs than requested"
        );
        warnings.push(SelectWarning::UnderSelected {
            selected: ranked.len(),
            wanted: config.top_k,
        });
    }
    for (slot, entry, id) in [
        (BaselineSlot::Naive, &naive, &baselines.naive),
        (BaselineSlot::Blast, &blast, &baselines.blast),
    ] {
        if entry.is_none() {
            warn!(slot = slot.display_name(), %id, "baseline curve not found");
            warnings.push(SelectWarning::MissingBaseline {
                slot,
                id: id.clone(),
            });
        }
    }

    info!(
        curves = stats.curves,
        candidates = stats.candidates,
        selected = stats.selected,
        "selection complete"
    );

    Ok(SelectionRun {
        selection: Selection {
            ranked,
            naive,
            blast,
            warnings,
        },
        stats,
    })
}

fn validate_inputs(
    curves: &[Curve],
    registry: &TeamRegistry,
    baselines: &BaselineIds,
    config: &SelectConfig,
) -> Result<(), SelectError> {
    if curves.is_empty() {
        return Err(SelectError::Config("No curves supplied.".to_string()));
    }
    if registry.is_empty() {
        return Err(SelectError::Config("Team registry is empty.".to_string()));
    }
    if baselines.naive.trim().is_empty() {
        return Err(SelectError::Config("Naive baseline id is empty.".to_string()));
    }
    if baselines.blast.trim().is_empty() {
        return Err(SelectError::Config("BLAST baseline id is empty.".to_string()));
    }
    if baselines.naive == baselines.blast {
        return Err(SelectError::Config(format!(
            "Naive and BLAST baselines share the id '{}'.",
            baselines.naive
        )));
    }
    if config.top_k == 0 {
        return Err(SelectError::Config("top_k must be >= 1.".to_string()));
    }
    for curve in curves {
        curve.validate()?;
    }
    Ok(())
}

/// Sort by S-min (ties by input index) and keep the best entry per PI.
///
/// Returns the selected entries and how many candidates were dropped as
/// repeats of an already-selected PI before the list filled up.
fn rank_by_pi(mut candidates: Vec<Candidate>, top_k: usize) -> (Vec<SelectionEntry>, usize) {
    candidates.sort_by(|a, b| {
        a.optimum
            .total_cmp(&b.optimum)
            .then_with(|| a.index.cmp(&b.index))
    });

    let mut seen_pis: HashSet<String> = HashSet::new();
    let mut ranked = Vec::with_capacity(top_k.min(candidates.len()));
    let mut same_pi = 0usize;

    for c in candidates {
        if ranked.len() == top_k {
            break;
        }
        if seen_pis.insert(c.entry.pi_name.clone()) {
            ranked.push(c.entry);
        } else {
            same_pi += 1;
        }
    }

    (ranked, same_pi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Optimum, Point, TeamRecord};
    use crate::math::SminSolver;
    use proptest::prelude::*;

    /// Solver that returns the first point's x as the optimum.
    ///
    /// Lets tests dictate S-min directly.
    struct FirstX;

    impl OptimumSolver for FirstX {
        fn solve(&self, points: &[Point], thresholds: &[f64]) -> Optimum {
            match (points.first(), thresholds.first()) {
                (Some(p), Some(&t)) => Optimum {
                    value: p.x,
                    point: *p,
                    threshold: t,
                },
                _ => Optimum::UNDEFINED,
            }
        }
    }

    fn qualified(reg: &mut TeamRegistry, id: &str, pi: &str) {
        reg.insert(
            id,
            TeamRecord {
                group_name: format!("G-{pi}"),
                pi_name: pi.to_string(),
                external_id: format!("T{id}-1"),
                category: Category::Qualified,
            },
        );
    }

    fn curve_with_smin(id: &str, smin: f64) -> Curve {
        Curve {
            id: id.to_string(),
            points: vec![Point::new(smin, 0.0)],
            thresholds: vec![0.5],
            coverage: 0.9,
            covered_count: 50,
        }
    }

    fn naive_registry() -> TeamRegistry {
        let mut reg = TeamRegistry::new();
        reg.insert(
            "BN4S",
            TeamRecord {
                group_name: "Naive".to_string(),
                pi_name: "baseline".to_string(),
                external_id: "BN4S-1".to_string(),
                category: Category::NaiveBaseline,
            },
        );
        reg
    }

    #[test]
    fn ranks_ascending_and_fills_naive_slot() {
        let mut reg = naive_registry();
        qualified(&mut reg, "m1", "Alpha");
        qualified(&mut reg, "m2", "Beta");

        let curves = vec![
            curve_with_smin("BN4S", 7.0),
            curve_with_smin("m1", 3.2),
            curve_with_smin("m2", 1.1),
        ];
        let run = select_top(
            &curves,
            &reg,
            &BaselineIds::default(),
            &FirstX,
            &SelectConfig::default(),
        )
        .unwrap();

        let ids: Vec<&str> = run.selection.ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
        assert!(run.selection.naive.is_some());
        assert!(run.selection.blast.is_none());
        assert_eq!(run.selection.under_selected(), Some(2));
        assert!(run.selection.warnings.contains(&SelectWarning::MissingBaseline {
            slot: BaselineSlot::Blast,
            id: "BB4S".to_string(),
        }));
    }

    #[test]
    fn ties_keep_input_order() {
        let mut reg = naive_registry();
        for (id, pi) in [("a", "P1"), ("b", "P2"), ("c", "P3")] {
            qualified(&mut reg, id, pi);
        }
        let curves = vec![
            curve_with_smin("b", 2.0),
            curve_with_smin("a", 2.0),
            curve_with_smin("c", 1.0),
        ];
        let run = select_top(
            &curves,
            &reg,
            &BaselineIds::default(),
            &FirstX,
            &SelectConfig::default(),
        )
        .unwrap();
        let ids: Vec<&str> = run.selection.ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn one_entry_per_pi_even_across_groups() {
        let mut reg = naive_registry();
        qualified(&mut reg, "x1", "Shared");
        reg.insert(
            "x2",
            TeamRecord {
                group_name: "OtherGroupName".to_string(),
                pi_name: "Shared".to_string(),
                external_id: "T9-3".to_string(),
                category: Category::Qualified,
            },
        );
        qualified(&mut reg, "y1", "Solo");

        let curves = vec![
            curve_with_smin("x2", 0.5),
            curve_with_smin("x1", 0.7),
            curve_with_smin("y1", 0.9),
        ];
        let run = select_top(
            &curves,
            &reg,
            &BaselineIds::default(),
            &FirstX,
            &SelectConfig::default(),
        )
        .unwrap();
        let ids: Vec<&str> = run.selection.ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x2", "y1"]);
        assert_eq!(run.stats.same_pi, 1);
        assert_eq!(run.selection.ranked[0].legend_tag, "OtherGroupName-3 (S=0.50,C=0.90)");
    }

    #[test]
    fn truncates_at_top_k() {
        let mut reg = naive_registry();
        let mut curves = Vec::new();
        for i in 0..15 {
            let id = format!("m{i}");
            qualified(&mut reg, &id, &format!("PI{i}"));
            curves.push(curve_with_smin(&id, 15.0 - i as f64));
        }
        let run = select_top(
            &curves,
            &reg,
            &BaselineIds::default(),
            &FirstX,
            &SelectConfig::default(),
        )
        .unwrap();
        assert_eq!(run.selection.ranked.len(), 10);
        assert_eq!(run.selection.ranked[0].id, "m14");
        assert_eq!(run.selection.under_selected(), None);
    }

    #[test]
    fn repeated_baseline_keeps_first() {
        let reg = naive_registry();
        let curves = vec![curve_with_smin("BN4S", 1.0), curve_with_smin("BN4S", 9.0)];
        let run = select_top(
            &curves,
            &reg,
            &BaselineIds::default(),
            &FirstX,
            &SelectConfig::default(),
        )
        .unwrap();
        let naive = run.selection.naive.unwrap();
        assert_eq!(naive.optimal_point, Point::new(1.0, 0.0));
        assert_eq!(run.stats.duplicate_baselines, 1);
    }

    #[test]
    fn configuration_errors() {
        let reg = naive_registry();
        let curves = vec![curve_with_smin("BN4S", 1.0)];
        let ids = BaselineIds::default();
        let cfg = SelectConfig::default();

        assert!(matches!(
            select_top(&[], &reg, &ids, &SminSolver, &cfg),
            Err(SelectError::Config(_))
        ));
        assert!(matches!(
            select_top(&curves, &TeamRegistry::new(), &ids, &SminSolver, &cfg),
            Err(SelectError::Config(_))
        ));
        let empty_naive = BaselineIds {
            naive: " ".to_string(),
            blast: "BB4S".to_string(),
        };
        assert!(matches!(
            select_top(&curves, &reg, &empty_naive, &SminSolver, &cfg),
            Err(SelectError::Config(_))
        ));
        let zero_k = SelectConfig {
            top_k: 0,
            ..SelectConfig::default()
        };
        assert!(matches!(
            select_top(&curves, &reg, &ids, &SminSolver, &zero_k),
            Err(SelectError::Config(_))
        ));

        let bad = Curve {
            thresholds: vec![],
            ..curve_with_smin("m1", 1.0)
        };
        assert!(matches!(
            select_top(&[bad], &reg, &ids, &SminSolver, &cfg),
            Err(SelectError::MalformedCurve { .. })
        ));
    }

    fn arb_candidates() -> impl Strategy<Value = Vec<(f64, u8)>> {
        prop::collection::vec((0.0f64..10.0, 0u8..12), 0..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_selection_is_sorted_pi_unique_and_bounded(raw in arb_candidates()) {
            let mut reg = naive_registry();
            let mut curves = Vec::new();
            for (i, &(smin, pi)) in raw.iter().enumerate() {
                let id = format!("m{i}");
                qualified(&mut reg, &id, &format!("PI{pi}"));
                curves.push(curve_with_smin(&id, smin));
            }
            curves.push(curve_with_smin("BN4S", 1.0));

            let run = select_top(
                &curves,
                &reg,
                &BaselineIds::default(),
                &FirstX,
                &SelectConfig::default(),
            ).unwrap();
            let ranked = &run.selection.ranked;

            let distinct_pis: HashSet<u8> = raw.iter().map(|&(_, pi)| pi).collect();
            prop_assert_eq!(ranked.len(), distinct_pis.len().min(10));
            prop_assert!(ranked.windows(2).all(|w| w[0].optimum_value <= w[1].optimum_value));
            let pis: HashSet<&str> = ranked.iter().map(|e| e.pi_name.as_str()).collect();
            prop_assert_eq!(pis.len(), ranked.len());
        }

        #[test]
        fn prop_selection_is_deterministic(raw in arb_candidates()) {
            let mut reg = naive_registry();
            let curves: Vec<Curve> = raw
                .iter()
                .enumerate()
                .map(|(i, &(smin, pi))| {
                    let id = format!("m{i}");
                    qualified(&mut reg, &id, &format!("PI{pi}"));
                    curve_with_smin(&id, smin)
                })
                .collect();
            if curves.is_empty() {
                return Ok(());
            }
            let ids = BaselineIds::default();
            let config = SelectConfig::default();
            let a = select_top(&curves, &reg, &ids, &FirstX, &config).unwrap();
            let b = select_top(&curves, &reg, &ids, &FirstX, &config).unwrap();
            prop_assert_eq!(a.selection, b.selection);
        }
    }
}
