//! Document-to-chart composition: one specification per output file.

use super::{
    BarChart, BarSeries, ChartBackend, ChartFrame, Line, LineChart, ScatterChart, ScatterPanel,
};
use crate::aggregate::{series_lines, summarize};
use crate::error::Result;
use crate::model::{BenchmarkDocument, CrossoverDocument, Operation, SeriesDocument};
use crate::scale::{Scale, ScaleMode, ScaleTransform, select_scale};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extra lines printed under every chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footnotes {
    /// Hardware description from benchmark metadata.
    pub hardware: Option<String>,
    pub notes: Vec<String>,
}

impl Footnotes {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.hardware
            .iter()
            .cloned()
            .chain(self.notes.iter().map(|note| format!("note: {note}")))
            .collect()
    }
}

/// Resolve the axis transform for `values`.
///
/// An explicit `log` cannot place zero, so an axis where no value survives
/// the resolved scale falls back to `mid`.
fn transform_for(mode: ScaleMode, values: &[f64]) -> ScaleTransform {
    let resolved = ScaleTransform::for_values(select_scale(values, mode), values);
    if values.iter().any(|v| resolved.forward(*v).is_some()) {
        return resolved;
    }
    debug!(scale = %resolved.scale(), "No value fits the resolved scale; using mid");
    ScaleTransform::for_values(Scale::Mid, values)
}

/// Builds chart specifications from documents and writes them through a
/// backend, one file per view.
pub struct ChartComposer<'a, B: ChartBackend> {
    backend: &'a mut B,
    out_dir: PathBuf,
    mode: ScaleMode,
    footnotes: Vec<String>,
}

impl<'a, B: ChartBackend> ChartComposer<'a, B> {
    pub fn new(backend: &'a mut B, out_dir: impl Into<PathBuf>, mode: ScaleMode) -> Self {
        Self {
            backend,
            out_dir: out_dir.into(),
            mode,
            footnotes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_footnotes(mut self, footnotes: &Footnotes) -> Self {
        self.footnotes = footnotes.lines();
        self
    }

    fn frame(&self, title: String, x_label: &str, y_label: String) -> ChartFrame {
        ChartFrame {
            title,
            x_label: x_label.to_string(),
            y_label,
            footnotes: self.footnotes.clone(),
        }
    }

    fn target(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        Ok(self.out_dir.join(file_name))
    }

    fn written(path: &Path) {
        info!(path = %path.display(), "Chart written");
    }

    /// Grouped summary bars plus one bar chart per operation.
    ///
    /// Writes `benchmark_summary.svg` and `benchmark_<op>.svg`. Operations
    /// without any available value are skipped.
    ///
    /// # Errors
    ///
    /// Propagates backend and output-directory failures.
    pub fn benchmark(&mut self, doc: &BenchmarkDocument) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        let categories: Vec<String> = doc.results.iter().map(|r| r.structure.clone()).collect();
        let series_for = |op: Operation| BarSeries {
            label: op.as_str().to_string(),
            values: doc.results.iter().map(|r| r.duration(op).value()).collect(),
        };

        let all: Vec<BarSeries> = Operation::ALL.iter().map(|op| series_for(*op)).collect();
        let values: Vec<f64> = all.iter().flat_map(|s| s.values.iter().flatten().copied()).collect();
        if values.is_empty() {
            debug!("No benchmark values to chart");
            return Ok(written);
        }

        let y_transform = transform_for(self.mode, &values);
        let chart = BarChart {
            frame: self.frame(
                "Benchmark summary".to_string(),
                "structure",
                format!("ms (mean){}", y_transform.axis_suffix()),
            ),
            categories: categories.clone(),
            series: all,
            y_transform,
        };
        let path = self.target("benchmark_summary.svg")?;
        self.backend.bar_chart(&path, &chart)?;
        Self::written(&path);
        written.push(path);

        for op in Operation::ALL {
            let series = series_for(op);
            let values: Vec<f64> = series.values.iter().flatten().copied().collect();
            if values.is_empty() {
                debug!(operation = %op, "No values for operation; skipping chart");
                continue;
            }
            let y_transform = transform_for(self.mode, &values);
            let chart = BarChart {
                frame: self.frame(
                    format!("Benchmark: {op}"),
                    "structure",
                    format!("{op} ms (mean){}", y_transform.axis_suffix()),
                ),
                categories: categories.clone(),
                series: vec![series],
                y_transform,
            };
            let path = self.target(&format!("benchmark_{op}.svg"))?;
            self.backend.bar_chart(&path, &chart)?;
            Self::written(&path);
            written.push(path);
        }
        Ok(written)
    }

    /// One line chart per operation, value over input size.
    ///
    /// Both axes get a scale resolved from their own values.
    ///
    /// # Errors
    ///
    /// Propagates backend and output-directory failures.
    pub fn series(&mut self, doc: &SeriesDocument) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for op in Operation::ALL {
            let lines: Vec<Line> = series_lines(&doc.points, op)
                .into_iter()
                .map(|line| Line {
                    label: line.structure,
                    points: line
                        .points
                        .into_iter()
                        .map(|(size, value)| (size as f64, value))
                        .collect(),
                })
                .collect();
            if lines.is_empty() {
                debug!(operation = %op, "No series points for operation; skipping chart");
                continue;
            }

            let xs: Vec<f64> = lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)).collect();
            let ys: Vec<f64> = lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)).collect();
            let x_transform = transform_for(self.mode, &xs);
            let y_transform = transform_for(self.mode, &ys);

            let chart = LineChart {
                frame: self.frame(
                    format!("Series: {op}"),
                    &format!("elements{}", x_transform.axis_suffix()),
                    format!("{op} ms{}", y_transform.axis_suffix()),
                ),
                lines,
                x_transform,
                y_transform,
            };
            let path = self.target(&format!("series_{op}.svg"))?;
            self.backend.line_chart(&path, &chart)?;
            Self::written(&path);
            written.push(path);
        }
        Ok(written)
    }

    /// Stacked scatter panels, one per operation, with `a vs b` labels.
    ///
    /// Every crossover point is drawn; the text display cap does not apply.
    ///
    /// # Errors
    ///
    /// Propagates backend and output-directory failures.
    pub fn crossover(&mut self, doc: &CrossoverDocument) -> Result<Vec<PathBuf>> {
        let groups = summarize(&doc.rows, usize::MAX);
        if groups.is_empty() {
            debug!("No crossover points to chart");
            return Ok(Vec::new());
        }

        let panels: Vec<ScatterPanel> = groups
            .iter()
            .map(|group| ScatterPanel {
                title: format!("Crossover sizes: {}", group.operation),
                points: group
                    .labelled_sizes()
                    .into_iter()
                    .map(|(size, label)| (size as f64, label))
                    .collect(),
            })
            .collect();
        let xs: Vec<f64> = panels.iter().flat_map(|p| p.points.iter().map(|pt| pt.0)).collect();
        let x_transform = transform_for(self.mode, &xs);

        let chart = ScatterChart {
            frame: self.frame(
                "Crossover points".to_string(),
                &format!("elements{}", x_transform.axis_suffix()),
                String::new(),
            ),
            panels,
            x_transform,
        };
        let path = self.target("crossover_points.svg")?;
        self.backend.scatter_chart(&path, &chart)?;
        Self::written(&path);
        Ok(vec![path])
    }
}
