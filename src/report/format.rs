//! Formatted terminal output.
//!
//! Formatting lives in one place so the selection code stays free of
//! presentation concerns.

use crate::domain::{BaselineSlot, Point, Selection, SelectionEntry};
use crate::io::SelectionFile;
use crate::select::SelectStats;

/// Format the run summary: counters, baselines, ranked table, warnings.
pub fn format_selection(selection: &Selection, stats: &SelectStats) -> String {
    let mut out = String::new();

    out.push_str("=== pfp - top methods by S-min ===\n");
    out.push_str(&format!(
        "Curves: n={} | candidates={} | selected={}\n",
        stats.curves, stats.candidates, stats.selected
    ));
    out.push_str(&format!(
        "Skipped: unmatched={} not_qualified={} no_coverage={} too_few={} undefined={} \
         bad_external_id={} same_pi={}\n",
        stats.unmatched,
        stats.not_qualified,
        stats.no_coverage,
        stats.too_few_covered,
        stats.undefined_optimum,
        stats.malformed_external_id,
        stats.same_pi
    ));
    out.push_str(&format_body(selection));
    out
}

/// Format a selection read back from a selection JSON export.
pub fn format_saved_selection(file: &SelectionFile) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} selection saved {} ===\n",
        file.tool,
        file.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Policy: top_k={} min_covered={} | selected={}\n",
        file.top_k,
        file.min_covered,
        file.selection.ranked.len()
    ));
    out.push_str(&format_body(&file.selection));
    out
}

fn format_body(selection: &Selection) -> String {
    let mut out = String::new();

    out.push_str("\nBaselines:\n");
    for slot in [BaselineSlot::Naive, BaselineSlot::Blast] {
        match selection.baseline(slot) {
            Some(e) => out.push_str(&format!(
                "- {:<6} {} @ tau={:.2} {}\n",
                slot.display_name(),
                e.legend_tag,
                e.optimal_threshold,
                fmt_point(e.optimal_point)
            )),
            None => out.push_str(&format!("- {:<6} (not available)\n", slot.display_name())),
        }
    }

    out.push_str("\nRanked:\n");
    out.push_str(&format_table(&selection.ranked));

    if !selection.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &selection.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn format_table(rows: &[SelectionEntry]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<32} {:<16} {:>8} {:>6} {:>6} {:<20}",
            "rank", "legend", "pi", "smin", "cov", "tau", "point"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:->4} {:-<32} {:-<16} {:->8} {:->6} {:->6} {:-<20}",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, e) in rows.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:<32} {:<16} {:>8.3} {:>6.2} {:>6.2} {:<20}",
                i + 1,
                truncate(&e.legend_tag, 32),
                truncate(&e.pi_name, 16),
                e.optimum_value.unwrap_or(f64::NAN),
                e.coverage,
                e.optimal_threshold,
                fmt_point(e.optimal_point),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a (reduced) curve as a tau / ru / mi table.
pub fn format_frontier(
    id: &str,
    points: &[Point],
    thresholds: &[f64],
    original_len: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Pareto frontier for {id}: {} of {original_len} points\n",
        points.len()
    ));
    out.push_str(&format!("{:>6} {:>10} {:>10}\n", "tau", "ru", "mi"));
    for (p, tau) in points.iter().zip(thresholds) {
        out.push_str(&format!("{tau:>6.2} {:>10.4} {:>10.4}\n", p.x, p.y));
    }
    out
}

fn fmt_point(p: Point) -> String {
    format!("({:.3}, {:.3})", p.x, p.y)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
