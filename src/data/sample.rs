//! Synthetic benchmark generation (curves + team registry).
//!
//! Produces a deterministic, realistic-looking set of RU/MI curves for dry
//! runs of the selection pipeline: several submissions per PI, PIs that
//! appear under more than one group name, disqualified teams, methods with
//! little or no coverage, and the two baselines.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{BaselineIds, Category, Curve, Point, TeamRecord, TeamRegistry};
use crate::error::AppError;

/// Number of benchmark proteins that coverage fractions refer to.
const BENCHMARK_SIZE: usize = 800;

/// Threshold grid resolution: `0.00, 0.01, ..., 1.00`.
const THRESHOLD_STEPS: usize = 100;

/// Share of teams registered as disqualified.
const DISQUALIFIED_PROB: f64 = 0.1;

/// Share of methods that cover (almost) nothing.
const LOW_COVERAGE_PROB: f64 = 0.08;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub methods: usize,
    pub seed: u64,
    pub baselines: BaselineIds,
}

#[derive(Debug, Clone)]
pub struct SampleBenchmark {
    pub curves: Vec<Curve>,
    pub registry: TeamRegistry,
    pub baselines: BaselineIds,
}

pub fn generate_benchmark(config: &SampleConfig) -> Result<SampleBenchmark, AppError> {
    if config.methods == 0 {
        return Err(AppError::new(2, "Method count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::<f64>::new(0.0, 0.05)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let skill = Normal::<f64>::new(1.0, 0.2)
        .map_err(|e| AppError::new(4, format!("Skill distribution error: {e}")))?;

    // Roughly two submissions per PI on average.
    let n_pis = (config.methods * 2 / 3).max(1);
    let mut submissions_per_pi = vec![0usize; n_pis];
    let disqualified: Vec<bool> = (0..n_pis).map(|_| rng.gen_bool(DISQUALIFIED_PROB)).collect();

    let mut curves = Vec::with_capacity(config.methods + 2);
    let mut registry = TeamRegistry::new();

    for i in 0..config.methods {
        let pi = rng.gen_range(0..n_pis);
        submissions_per_pi[pi] += 1;
        let model = submissions_per_pi[pi];

        // Some PIs submit under a second group name.
        let group_name = if model > 1 && pi % 3 == 0 {
            format!("Group{pi:02}-alt")
        } else {
            format!("Group{pi:02}")
        };
        let category = if disqualified[pi] {
            Category::Disqualified
        } else {
            Category::Qualified
        };

        let id = format!("M{:03}", i + 1);
        registry.insert(
            id.clone(),
            TeamRecord {
                group_name,
                pi_name: format!("PI{pi:02}"),
                external_id: format!("T{:03}-{model}", 100 + pi),
                category,
            },
        );

        let coverage = if rng.gen_bool(LOW_COVERAGE_PROB) {
            rng.gen_range(0.0..0.01)
        } else {
            rng.gen_range(0.3..1.0)
        };
        let quality = skill.sample(&mut rng).clamp(0.4, 1.8);
        curves.push(synthetic_curve(id, quality, coverage, &mut rng, &noise));
    }

    for (id, name, quality, coverage) in [
        (&config.baselines.naive, "Naive", 0.6, 1.0),
        (&config.baselines.blast, "BLAST", 0.8, 0.9),
    ] {
        let category = if name == "Naive" {
            Category::NaiveBaseline
        } else {
            Category::BlastBaseline
        };
        registry.insert(
            id.clone(),
            TeamRecord {
                group_name: name.to_string(),
                pi_name: "baseline".to_string(),
                external_id: format!("{id}-1"),
                category,
            },
        );
        curves.push(synthetic_curve(id.clone(), quality, coverage, &mut rng, &noise));
    }

    Ok(SampleBenchmark {
        curves,
        registry,
        baselines: config.baselines.clone(),
    })
}

/// Build one RU/MI curve over the threshold grid.
///
/// Remaining uncertainty grows with the threshold and misinformation shrinks;
/// `quality > 1` pulls the whole curve towards the origin. The tau = 0 point
/// is the degenerate "predict everything" corner.
fn synthetic_curve(
    id: String,
    quality: f64,
    coverage: f64,
    rng: &mut StdRng,
    noise: &Normal<f64>,
) -> Curve {
    let scale = 12.0 / quality;
    let mut points = Vec::with_capacity(THRESHOLD_STEPS + 1);
    let mut thresholds = Vec::with_capacity(THRESHOLD_STEPS + 1);

    for k in 0..=THRESHOLD_STEPS {
        let tau = k as f64 / THRESHOLD_STEPS as f64;
        let point = if k == 0 {
            Point::new(0.0, scale * 8.0)
        } else {
            let ru = scale * (0.25 + 0.75 * tau.powf(1.5));
            let mi = scale * (0.1 + 1.6 * (1.0 - tau).powi(2));
            Point::new(
                (ru * (1.0 + noise.sample(rng))).max(0.0),
                (mi * (1.0 + noise.sample(rng))).max(0.0),
            )
        };
        points.push(point);
        thresholds.push(tau);
    }

    Curve {
        id,
        points,
        thresholds,
        coverage,
        covered_count: (coverage * BENCHMARK_SIZE as f64).round() as usize,
    }
}
