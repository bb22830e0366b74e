//! SVG chart backend built on `plotters`.
//!
//! Values are drawn in transformed space on a linear axis; tick labels go
//! through the inverse transform so they read in data units.

use super::{
    BarChart, ChartBackend, ChartFrame, LineChart, ScatterChart, axis_range, baseline,
    format_tick, render_error,
};
use crate::error::Result;
use crate::scale::ScaleTransform;
use anyhow::anyhow;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const WIDTH: u32 = 1000;
const PLOT_HEIGHT: u32 = 560;
const PANEL_HEIGHT: u32 = 220;
const TITLE_FONT_SIZE: u32 = 28;
const PANEL_TITLE_FONT_SIZE: u32 = 18;
const LABEL_FONT_SIZE: u32 = 14;
const FOOTNOTE_FONT_SIZE: u32 = 13;
const FOOTNOTE_LINE_HEIGHT: u32 = 18;

const COLORS: &[RGBColor] = &[
    RGBColor(66, 133, 244),
    RGBColor(251, 188, 5),
    RGBColor(52, 168, 83),
    RGBColor(234, 67, 53),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
];

fn color(index: usize) -> RGBColor {
    COLORS[index % COLORS.len()]
}

/// Writes SVG files with `plotters`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgBackend;

impl ChartBackend for SvgBackend {
    fn bar_chart(&mut self, path: &Path, chart: &BarChart) -> Result<()> {
        draw_bars(path, chart).map_err(|err| render_error(path, &err))
    }

    fn line_chart(&mut self, path: &Path, chart: &LineChart) -> Result<()> {
        draw_lines(path, chart).map_err(|err| render_error(path, &err))
    }

    fn scatter_chart(&mut self, path: &Path, chart: &ScatterChart) -> Result<()> {
        draw_scatter(path, chart).map_err(|err| render_error(path, &err))
    }
}

fn footer_height(frame: &ChartFrame) -> u32 {
    if frame.footnotes.is_empty() {
        0
    } else {
        frame.footnotes.len() as u32 * FOOTNOTE_LINE_HEIGHT + 10
    }
}

fn draw_footnotes(area: &DrawingArea<SVGBackend<'_>, Shift>, lines: &[String]) -> anyhow::Result<()> {
    for (i, line) in lines.iter().enumerate() {
        let y = 4 + (i as u32 * FOOTNOTE_LINE_HEIGHT) as i32;
        area.draw(&Text::new(
            line.as_str(),
            (12, y),
            ("sans-serif", FOOTNOTE_FONT_SIZE).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

/// Padded drawing-space range for a numeric axis that need not start at a
/// baseline.
fn span_range(transform: &ScaleTransform, values: &[f64]) -> Option<Range<f64>> {
    let mapped: Vec<f64> = values.iter().filter_map(|v| transform.forward(*v)).collect();
    let lo = mapped.iter().copied().reduce(f64::min)?;
    let hi = mapped.iter().copied().reduce(f64::max)?;
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    Some(lo - pad..hi + pad)
}

fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

fn draw_bars(path: &Path, chart: &BarChart) -> anyhow::Result<()> {
    let t = &chart.y_transform;
    let values: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().flatten().copied())
        .collect();
    let y_range = axis_range(t, &values).ok_or_else(|| anyhow!("no drawable values"))?;
    let base = baseline(t, y_range.start).max(y_range.start);

    let root = SVGBackend::new(path, (WIDTH, PLOT_HEIGHT + footer_height(&chart.frame)))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, foot_area) = root.split_vertically(PLOT_HEIGHT);
    draw_footnotes(&foot_area, &chart.frame.footnotes)?;

    let categories = &chart.categories;
    let n = categories.len();
    let mut cc = ChartBuilder::on(&plot_area)
        .caption(&chart.frame.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_range)?;

    cc.configure_mesh()
        .disable_x_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&|x| category_label(categories, *x))
        .y_label_formatter(&|y| format_tick(t.inverse(*y)))
        .x_desc(chart.frame.x_label.as_str())
        .y_desc(chart.frame.y_label.as_str())
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()?;

    let count = chart.series.len().max(1) as f64;
    let bar_width = 0.8 / count;
    for (s_idx, series) in chart.series.iter().enumerate() {
        let fill = color(s_idx);
        let offset = (s_idx as f64 - (count - 1.0) / 2.0) * bar_width;
        let bars = series.values.iter().enumerate().filter_map(|(i, value)| {
            let top = t.forward((*value)?)?;
            let center = i as f64 + offset;
            Some(Rectangle::new(
                [
                    (center - bar_width / 2.0 + 0.01, base),
                    (center + bar_width / 2.0 - 0.01, top),
                ],
                fill.filled(),
            ))
        });
        cc.draw_series(bars)?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], fill.filled()));
    }

    if chart.series.len() > 1 {
        cc.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    root.present()?;
    Ok(())
}

fn draw_lines(path: &Path, chart: &LineChart) -> anyhow::Result<()> {
    let (xt, yt) = (&chart.x_transform, &chart.y_transform);
    let xs: Vec<f64> = chart.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)).collect();
    let ys: Vec<f64> = chart.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)).collect();
    let x_range = span_range(xt, &xs).ok_or_else(|| anyhow!("no drawable sizes"))?;
    let y_range = axis_range(yt, &ys).ok_or_else(|| anyhow!("no drawable values"))?;

    let root = SVGBackend::new(path, (WIDTH, PLOT_HEIGHT + footer_height(&chart.frame)))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, foot_area) = root.split_vertically(PLOT_HEIGHT);
    draw_footnotes(&foot_area, &chart.frame.footnotes)?;

    let mut cc = ChartBuilder::on(&plot_area)
        .caption(&chart.frame.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    cc.configure_mesh()
        .x_label_formatter(&|x| format_tick(xt.inverse(*x)))
        .y_label_formatter(&|y| format_tick(yt.inverse(*y)))
        .x_desc(chart.frame.x_label.as_str())
        .y_desc(chart.frame.y_label.as_str())
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()?;

    for (idx, line) in chart.lines.iter().enumerate() {
        let stroke = color(idx);
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .filter_map(|(x, y)| Some((xt.forward(*x)?, yt.forward(*y)?)))
            .collect();
        if points.is_empty() {
            continue;
        }
        cc.draw_series(LineSeries::new(points.clone(), stroke.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke.stroke_width(2)));
        cc.draw_series(points.into_iter().map(|p| Circle::new(p, 3, stroke.filled())))?;
    }

    cc.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_scatter(path: &Path, chart: &ScatterChart) -> anyhow::Result<()> {
    let xt = &chart.x_transform;
    let xs: Vec<f64> = chart
        .panels
        .iter()
        .flat_map(|p| p.points.iter().map(|pt| pt.0))
        .collect();
    let x_range = span_range(xt, &xs).ok_or_else(|| anyhow!("no drawable sizes"))?;

    let panels = chart.panels.len().max(1);
    let plot_height = PANEL_HEIGHT * panels as u32 + 50;
    let root = SVGBackend::new(path, (WIDTH, plot_height + footer_height(&chart.frame)))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, foot_area) = root.split_vertically(plot_height);
    draw_footnotes(&foot_area, &chart.frame.footnotes)?;

    let plot_area = plot_area.titled(&chart.frame.title, ("sans-serif", TITLE_FONT_SIZE))?;
    for (area, panel) in plot_area.split_evenly((panels, 1)).iter().zip(&chart.panels) {
        let mut cc = ChartBuilder::on(area)
            .caption(&panel.title, ("sans-serif", PANEL_TITLE_FONT_SIZE))
            .margin(10)
            .x_label_area_size(40)
            .build_cartesian_2d(x_range.clone(), 0.0..2.0)?;

        cc.configure_mesh()
            .disable_y_mesh()
            .disable_y_axis()
            .x_label_formatter(&|x| format_tick(xt.inverse(*x)))
            .x_desc(chart.frame.x_label.as_str())
            .label_style(("sans-serif", LABEL_FONT_SIZE))
            .draw()?;

        let marks: Vec<(f64, &str)> = panel
            .points
            .iter()
            .filter_map(|(x, label)| Some((xt.forward(*x)?, label.as_str())))
            .collect();
        cc.draw_series(marks.iter().map(|(x, label)| {
            EmptyElement::at((*x, 1.0))
                + Cross::new((0, 0), 5, RED.stroke_width(2))
                + Text::new(
                    (*label).to_string(),
                    (6, -16),
                    ("sans-serif", LABEL_FONT_SIZE).into_font(),
                )
        }))?;
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BarSeries, Line, ScatterPanel};
    use crate::scale::Scale;
    use tempfile::TempDir;

    fn frame(notes: &[&str]) -> ChartFrame {
        ChartFrame {
            title: "Benchmark summary".to_string(),
            x_label: "structure".to_string(),
            y_label: "ms (mean)".to_string(),
            footnotes: notes.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn writes_bar_svg_with_labels() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bars.svg");
        let chart = BarChart {
            frame: frame(&["cpu: test"]),
            categories: vec!["array".to_string(), "list".to_string()],
            series: vec![BarSeries {
                label: "insert".to_string(),
                values: vec![Some(1.0), None],
            }],
            y_transform: ScaleTransform::for_values(Scale::Mid, &[1.0]),
        };
        SvgBackend.bar_chart(&path, &chart).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Benchmark summary"));
        assert!(svg.contains("cpu: test"));
    }

    #[test]
    fn writes_line_and_scatter_svgs() {
        let temp = TempDir::new().unwrap();
        let line_path = temp.path().join("series.svg");
        let line = LineChart {
            frame: frame(&[]),
            lines: vec![Line {
                label: "array".to_string(),
                points: vec![(10.0, 1.0), (1000.0, 4.0)],
            }],
            x_transform: ScaleTransform::for_values(Scale::Log, &[10.0]),
            y_transform: ScaleTransform::for_values(Scale::Linear, &[1.0]),
        };
        SvgBackend.line_chart(&line_path, &line).unwrap();
        assert!(line_path.exists());

        let scatter_path = temp.path().join("cross.svg");
        let scatter = ScatterChart {
            frame: frame(&[]),
            panels: vec![ScatterPanel {
                title: "Crossover sizes: insert".to_string(),
                points: vec![(512.0, "array vs list".to_string())],
            }],
            x_transform: ScaleTransform::for_values(Scale::Linear, &[512.0]),
        };
        SvgBackend.scatter_chart(&scatter_path, &scatter).unwrap();
        let svg = std::fs::read_to_string(&scatter_path).unwrap();
        assert!(svg.contains("array vs list"));
    }

    #[test]
    fn nothing_drawable_is_a_render_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.svg");
        let chart = BarChart {
            frame: frame(&[]),
            categories: vec!["a".to_string()],
            series: vec![BarSeries {
                label: "insert".to_string(),
                values: vec![None],
            }],
            y_transform: ScaleTransform::for_values(Scale::Linear, &[]),
        };
        let err = SvgBackend.bar_chart(&path, &chart).unwrap_err();
        assert!(matches!(err, crate::error::ReportError::Render { .. }));
    }
}
