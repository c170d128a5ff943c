//! Rendering of evaluation results for the terminal.

use std::fmt::Write as _;

use collab_map_activity_models::{ActivityRecord, FilterSelection};
use collab_map_engine::{Evaluation, FilterStats};
use collab_map_geography_models::{CountyLabel, CountyTally, format_percentage};
use serde::Serialize;

/// JSON form of one evaluation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport<'a> {
    pub selection: &'a FilterSelection,
    pub stats: FilterStats,
    pub tally: &'a CountyTally,
    pub labels: Vec<CountyLabel>,
    pub records: Vec<&'a ActivityRecord>,
}

impl<'a> EvaluationReport<'a> {
    #[must_use]
    pub fn new(selection: &'a FilterSelection, evaluation: &'a Evaluation<'a>) -> Self {
        Self {
            selection,
            stats: evaluation.stats(),
            tally: evaluation.tally(),
            labels: evaluation.labels(),
            records: evaluation.records().collect(),
        }
    }
}

/// Per-county counts and shares, one row per region in region order,
/// followed by the map labels.
#[must_use]
pub fn tally_table(evaluation: &Evaluation<'_>) -> String {
    let tally = evaluation.tally();
    let width = tally
        .regions
        .iter()
        .map(|r| r.region_id.len())
        .max()
        .unwrap_or(0)
        .max("County".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>6}  {:>7}", "County", "Count", "Share");
    for region in &tally.regions {
        let _ = writeln!(
            out,
            "{:<width$}  {:>6}  {:>7}",
            region.region_id,
            region.count,
            format_percentage(region.percentage)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Filtered activities: {}", tally.total);
    if tally.unassigned > 0 {
        let _ = writeln!(out, "Unassigned: {}", tally.unassigned);
    }

    let stats = evaluation.stats();
    let _ = writeln!(
        out,
        "Skipped: {} without coordinates, {} outside the boundary",
        stats.missing_coordinates, stats.outside_boundary
    );

    let labels = evaluation.labels();
    if !labels.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Labels:");
        for label in labels {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>7}  ({:.5}, {:.5})",
                label.region_id, label.percentage, label.latitude, label.longitude
            );
        }
    }

    out
}

/// A heading naming the filter control, then one value per line with the
/// leading `All` choice where applicable.
#[must_use]
pub fn choice_list<'a>(heading: &str, choices: impl IntoIterator<Item = &'a str>) -> String {
    choices
        .into_iter()
        .fold(format!("{heading}:\n"), |mut out, choice| {
            let _ = writeln!(out, "  {choice}");
            out
        })
}
