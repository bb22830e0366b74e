//! Chart composition and the drawing-backend seam.
//!
//! [`ChartComposer`] turns documents into chart specifications and hands them
//! to a [`ChartBackend`]. Specifications carry data-space values plus the
//! [`ScaleTransform`] to apply; backends draw in transformed space and label
//! ticks through the inverse mapping.

mod compose;
#[cfg(feature = "charts")]
mod svg;

pub use compose::{ChartComposer, Footnotes};
#[cfg(feature = "charts")]
pub use svg::SvgBackend;

use crate::error::{ReportError, Result};
use crate::scale::ScaleTransform;
use std::ops::Range;
use std::path::Path;

/// Title, axis captions and footnote lines shared by every chart kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Hardware description and free-text notes, one line each.
    pub footnotes: Vec<String>,
}

/// One bar per category for a named series. `None` leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Grouped bar chart: categories along x, one bar per series in each group.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub frame: ChartFrame,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub y_transform: ScaleTransform,
}

/// Named polyline of `(x, y)` points, ascending by x.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Line chart over a numeric x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub frame: ChartFrame,
    pub lines: Vec<Line>,
    pub x_transform: ScaleTransform,
    pub y_transform: ScaleTransform,
}

/// One panel of annotated points along a single numeric axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub title: String,
    pub points: Vec<(f64, String)>,
}

/// Stacked scatter panels sharing an x scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub frame: ChartFrame,
    pub panels: Vec<ScatterPanel>,
    pub x_transform: ScaleTransform,
}

/// Drawing capability used by the composer.
///
/// Implementations write one file per call.
pub trait ChartBackend {
    /// Draw grouped bars.
    ///
    /// # Errors
    ///
    /// Returns `Render` if the file cannot be drawn or written.
    fn bar_chart(&mut self, path: &Path, chart: &BarChart) -> Result<()>;

    /// Draw lines.
    ///
    /// # Errors
    ///
    /// Returns `Render` if the file cannot be drawn or written.
    fn line_chart(&mut self, path: &Path, chart: &LineChart) -> Result<()>;

    /// Draw annotated scatter panels.
    ///
    /// # Errors
    ///
    /// Returns `Render` if the file cannot be drawn or written.
    fn scatter_chart(&mut self, path: &Path, chart: &ScatterChart) -> Result<()>;
}

/// The SVG backend compiled into this binary.
///
/// # Errors
///
/// Returns `ChartBackendUnavailable` when built without the `charts` feature.
#[cfg(feature = "charts")]
pub fn default_backend() -> Result<SvgBackend> {
    Ok(SvgBackend::default())
}

/// The SVG backend compiled into this binary.
///
/// # Errors
///
/// Returns `ChartBackendUnavailable` when built without the `charts` feature.
#[cfg(not(feature = "charts"))]
pub fn default_backend() -> Result<NoBackend> {
    Err(ReportError::ChartBackendUnavailable)
}

/// Uninhabited backend for builds without charting support.
#[cfg(not(feature = "charts"))]
#[derive(Debug)]
pub enum NoBackend {}

#[cfg(not(feature = "charts"))]
impl ChartBackend for NoBackend {
    fn bar_chart(&mut self, _path: &Path, _chart: &BarChart) -> Result<()> {
        match *self {}
    }

    fn line_chart(&mut self, _path: &Path, _chart: &LineChart) -> Result<()> {
        match *self {}
    }

    fn scatter_chart(&mut self, _path: &Path, _chart: &ScatterChart) -> Result<()> {
        match *self {}
    }
}

/// Drawing-space axis range covering `values`, or `None` if nothing can be
/// placed.
///
/// The range starts at the bar baseline (zero, or the decade below the
/// smallest value on a log scale) and leaves 10% headroom above the maximum.
#[must_use]
pub fn axis_range(transform: &ScaleTransform, values: &[f64]) -> Option<Range<f64>> {
    let mapped: Vec<f64> = values.iter().filter_map(|v| transform.forward(*v)).collect();
    let lo = mapped.iter().copied().reduce(f64::min)?;
    let hi = mapped.iter().copied().reduce(f64::max)?;

    let floor = baseline(transform, lo).min(lo);
    let span = if hi > floor { hi - floor } else { 1.0 };
    Some(floor..hi + span * 0.1)
}

/// Where bars start in drawing space.
#[must_use]
pub fn baseline(transform: &ScaleTransform, lowest: f64) -> f64 {
    match transform.scale() {
        crate::scale::Scale::Log => lowest.floor(),
        crate::scale::Scale::Linear | crate::scale::Scale::Mid => 0.0,
    }
}

/// Compact numeric tick label.
#[must_use]
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 100.0 {
        format!("{value:.0}")
    } else if magnitude >= 1.0 {
        format!("{value:.1}")
    } else if magnitude == 0.0 {
        "0".to_string()
    } else {
        format!("{value:.3}")
    }
}

/// Map a backend failure on `path` into a render error.
#[cfg(feature = "charts")]
pub(crate) fn render_error(path: &Path, err: &anyhow::Error) -> ReportError {
    ReportError::Render {
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Scale;

    #[test]
    fn linear_range_starts_at_zero() {
        let t = ScaleTransform::for_values(Scale::Linear, &[2.0, 10.0]);
        let range = axis_range(&t, &[2.0, 10.0]).unwrap();
        assert!(range.start.abs() < f64::EPSILON);
        assert!((range.end - 11.0).abs() < 1e-9);
    }

    #[test]
    fn log_range_starts_at_decade() {
        let t = ScaleTransform::for_values(Scale::Log, &[5.0, 5000.0]);
        let range = axis_range(&t, &[5.0, 5000.0]).unwrap();
        assert!(range.start.abs() < f64::EPSILON);
        assert!(range.end > 5000f64.log10());
    }

    #[test]
    fn all_zero_range_keeps_a_unit_span() {
        let t = ScaleTransform::for_values(Scale::Mid, &[0.0]);
        let range = axis_range(&t, &[0.0, 0.0]).unwrap();
        assert!(range.start.abs() < f64::EPSILON);
        assert!((range.end - 0.1).abs() < 1e-9);
    }

    #[test]
    fn nothing_placeable_has_no_range() {
        let t = ScaleTransform::for_values(Scale::Log, &[]);
        assert!(axis_range(&t, &[0.0, -1.0]).is_none());
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(0.0123), "0.012");
        assert_eq!(format_tick(2.46), "2.5");
        assert_eq!(format_tick(12_345.6), "12346");
    }
}
