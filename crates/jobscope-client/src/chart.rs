//! Four-panel SVG report rendered with plotters.
//!
//! [`ReportLayout`] holds exactly the `(label, count)` pairs each panel shows,
//! taken in order from an [`AggregateReport`]; the drawing code only reads
//! from the layout.

use std::path::Path;

use jobscope_core::error::AppError;
use jobscope_core::models::RankedEntry;
use jobscope_core::report::AggregateReport;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{Palette, Palette99};

pub const REPORT_TITLE: &str = "Data Analyst Job Market Analysis";

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 1200;
const FONT: &str = "sans-serif";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Pie,
}

/// One panel of the report image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: String,
    pub kind: ChartKind,
    pub value_axis: &'static str,
    pub color: RGBColor,
    pub entries: Vec<RankedEntry>,
}

/// The fixed 2x2 layout, row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub panels: [ChartPanel; 4],
}

impl ReportLayout {
    pub fn from_report(report: &AggregateReport) -> Self {
        let panel = |title: String, kind, value_axis, color, entries: &[RankedEntry]| ChartPanel {
            title,
            kind,
            value_axis,
            color,
            entries: entries.to_vec(),
        };

        Self {
            panels: [
                panel(
                    format!("Top {} Job Locations", report.limits.cities),
                    ChartKind::Bar,
                    "Number of Jobs",
                    SKY_BLUE,
                    &report.top_cities,
                ),
                panel(
                    "Most In-Demand Skills".to_string(),
                    ChartKind::HorizontalBar,
                    "Number of Mentions",
                    LIGHT_CORAL,
                    &report.top_skills,
                ),
                panel(
                    "Job Distribution by Location".to_string(),
                    ChartKind::Pie,
                    "",
                    SKY_BLUE,
                    &report.top_cities,
                ),
                panel(
                    "Top Companies by Job Postings".to_string(),
                    ChartKind::Bar,
                    "Number of Jobs",
                    LIGHT_GREEN,
                    &report.top_companies,
                ),
            ],
        }
    }
}

/// Render the report to an SVG file.
pub fn render_svg_file(path: &Path, layout: &ReportLayout) -> Result<(), AppError> {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    draw_layout(&root, layout)?;
    tracing::info!(path = %path.display(), "Report image saved");
    Ok(())
}

/// Render the report to an in-memory SVG document.
pub fn render_svg_string(layout: &ReportLayout) -> Result<String, AppError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw_layout(&root, layout)?;
    }
    Ok(svg)
}

fn draw_layout<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &ReportLayout,
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(chart_err)?;
    let body = root.titled(REPORT_TITLE, (FONT, 32)).map_err(chart_err)?;

    for (area, panel) in body.split_evenly((2, 2)).iter().zip(&layout.panels) {
        if panel.entries.is_empty() {
            draw_empty(area, panel)?;
            continue;
        }
        match panel.kind {
            ChartKind::Bar => draw_bars(area, panel)?,
            ChartKind::HorizontalBar => draw_horizontal_bars(area, panel)?,
            ChartKind::Pie => draw_pie(area, panel)?,
        }
    }

    root.present().map_err(chart_err)
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
) -> Result<(), AppError> {
    let (n, max) = extent(&panel.entries);
    let labels = labels(&panel.entries);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..max + 1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n as usize)
        .x_label_formatter(&|v| segment_label(&labels, v))
        .y_desc(panel.value_axis)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(panel.entries.iter().zip(0u32..).map(|(entry, i)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), entry.count as u32),
                ],
                panel.color.filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_horizontal_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
) -> Result<(), AppError> {
    let (n, max) = extent(&panel.entries);
    let labels = labels(&panel.entries);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(160)
        .build_cartesian_2d(0u32..max + 1, (0u32..n).into_segmented())
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n as usize)
        .y_label_formatter(&|v| segment_label(&labels, v))
        .x_desc(panel.value_axis)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(panel.entries.iter().zip(0u32..).map(|(entry, i)| {
            Rectangle::new(
                [
                    (0, SegmentValue::Exact(i)),
                    (entry.count as u32, SegmentValue::Exact(i + 1)),
                ],
                panel.color.filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
) -> Result<(), AppError> {
    let area = area.titled(&panel.title, (FONT, 22)).map_err(chart_err)?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;
    let total: usize = panel.entries.iter().map(|e| e.count).sum();

    let at = |degrees: f64, scale: f64| {
        let rad = degrees.to_radians();
        (
            center.0 + (radius * scale * rad.cos()) as i32,
            center.1 + (radius * scale * rad.sin()) as i32,
        )
    };

    // Start at twelve o'clock.
    let mut start = -90.0;
    for (i, entry) in panel.entries.iter().enumerate() {
        let share = entry.count as f64 / total as f64;
        let sweep = 360.0 * share;
        let steps = (sweep.ceil() as usize).max(2);

        let mut points = vec![center];
        points.extend((0..=steps).map(|s| at(start + sweep * s as f64 / steps as f64, 1.0)));
        area.draw(&Polygon::new(points, Palette99::pick(i).filled()))
            .map_err(chart_err)?;

        area.draw(&Text::new(
            format!("{} ({:.1}%)", entry.label, share * 100.0),
            at(start + sweep / 2.0, 1.15),
            (FONT, 14),
        ))
        .map_err(chart_err)?;

        start += sweep;
    }

    Ok(())
}

fn draw_empty<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
) -> Result<(), AppError> {
    let area = area.titled(&panel.title, (FONT, 22)).map_err(chart_err)?;
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        "No data",
        (w as i32 / 2 - 30, h as i32 / 2),
        (FONT, 18),
    ))
    .map_err(chart_err)
}

/// Number of bars and the tallest count.
fn extent(entries: &[RankedEntry]) -> (u32, u32) {
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    (entries.len() as u32, max as u32)
}

fn labels(entries: &[RankedEntry]) -> Vec<String> {
    entries.iter().map(|e| e.label.clone()).collect()
}

fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn chart_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::ChartError(e.to_string())
}
