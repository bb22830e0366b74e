//! Per-structure reduction of a series document.
//!
//! Each structure yields the value measured at its largest input size and the
//! median of every available value across sizes.

use crate::model::{Measure, Operation, SeriesPoint};
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate for one structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub structure: String,
    /// Largest parseable size seen for the structure.
    pub latest_size: Option<u64>,
    /// Value at `latest_size`.
    pub latest: Measure,
    pub median: Measure,
}

/// Available `(size, value)` pairs for one structure, ascending by size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLine {
    pub structure: String,
    pub points: Vec<(u64, f64)>,
}

#[derive(Default)]
struct Accumulator {
    latest: Option<(u64, Measure)>,
    values: Vec<f64>,
}

/// Median with the even-count midpoint rule. `None` for no values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Reduce series points per structure for one operation.
///
/// Output follows first-appearance order of structure names. A point replaces
/// the latest value only when its size is strictly greater than the current
/// maximum, so among equal sizes the first one seen wins. Points without a
/// size still contribute to the median.
#[must_use]
pub fn aggregate_series(points: &[SeriesPoint], op: Operation) -> Vec<SeriesSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut accumulators: HashMap<&str, Accumulator> = HashMap::new();

    for point in points {
        let name = point.structure.as_str();
        let acc = accumulators.entry(name).or_insert_with(|| {
            order.push(name);
            Accumulator::default()
        });

        let value = point.duration(op);
        if let Some(size) = point.size {
            if acc.latest.is_none_or(|(current, _)| size > current) {
                acc.latest = Some((size, value));
            }
        }
        if let Some(v) = value.value() {
            acc.values.push(v);
        }
    }

    order
        .into_iter()
        .filter_map(|name| {
            let acc = accumulators.remove(name)?;
            Some(SeriesSummary {
                structure: name.to_string(),
                latest_size: acc.latest.map(|(size, _)| size),
                latest: acc.latest.map_or(Measure::Unavailable, |(_, value)| value),
                median: median(&acc.values).into(),
            })
        })
        .collect()
}

/// Group available points per structure for line charts.
///
/// Points without a size or value are dropped. Structures with no remaining
/// points are omitted.
#[must_use]
pub fn series_lines(points: &[SeriesPoint], op: Operation) -> Vec<SeriesLine> {
    let mut lines: Vec<SeriesLine> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for point in points {
        let (Some(size), Some(value)) = (point.size, point.duration(op).value()) else {
            continue;
        };
        let slot = *index.entry(point.structure.as_str()).or_insert_with(|| {
            lines.push(SeriesLine {
                structure: point.structure.clone(),
                points: Vec::new(),
            });
            lines.len() - 1
        });
        lines[slot].points.push((size, value));
    }

    for line in &mut lines {
        line.points.sort_by_key(|(size, _)| *size);
    }
    lines
}
