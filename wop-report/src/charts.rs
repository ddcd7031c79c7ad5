use crate::ScoreRecord;
use anyhow::{Context, Result};
use std::path::Path;
use svg::node::element::{Group, Line, Polyline, Rectangle, Text};
use svg::Document;

const MARGIN: f32 = 45.0;
const PLOT_HEIGHT: f32 = 240.0;
const BAR_WIDTH: f32 = 14.0;
const GROUP_SPACING: f32 = 54.0;

const SOLVER_COLOR: &str = "#1f77b4";
const BEST_COLOR: &str = "#2ca02c";
const BASELINE_COLOR: &str = "#ff7f0e";

/// Grouped bar chart for one instance set: solver, best-known and baseline
/// score side by side per instance.
pub fn score_chart(set_name: &str, records: &[ScoreRecord]) -> Document {
    let width = MARGIN * 2.0 + records.len() as f32 * GROUP_SPACING;
    let height = MARGIN * 2.0 + PLOT_HEIGHT;
    let max_score = records
        .iter()
        .flat_map(|r| [r.solver_score, r.best_known_score, r.baseline_score])
        .fold(0.0f64, f64::max)
        .max(1.0);

    let bar = |x: f32, score: f64, color: &str| {
        let bar_height = (score / max_score) as f32 * PLOT_HEIGHT;
        Rectangle::new()
            .set("x", x)
            .set("y", MARGIN + PLOT_HEIGHT - bar_height)
            .set("width", BAR_WIDTH)
            .set("height", bar_height)
            .set("fill", color)
    };

    let mut bars = Group::new();
    for (i, record) in records.iter().enumerate() {
        let x0 = MARGIN + i as f32 * GROUP_SPACING + (GROUP_SPACING - 3.0 * BAR_WIDTH) / 2.0;
        bars = bars
            .add(bar(x0, record.solver_score, SOLVER_COLOR))
            .add(bar(x0 + BAR_WIDTH, record.best_known_score, BEST_COLOR))
            .add(bar(x0 + 2.0 * BAR_WIDTH, record.baseline_score, BASELINE_COLOR))
            .add(
                Text::new(record.instance_name.clone())
                    .set("x", MARGIN + (i as f32 + 0.5) * GROUP_SPACING)
                    .set("y", MARGIN + PLOT_HEIGHT + 14.0)
                    .set("font-size", 9)
                    .set("font-family", "monospace")
                    .set("text-anchor", "middle"),
            );
    }

    chart_frame(set_name, width, height, max_score)
        .add(bars)
        .add(legend(width))
}

/// Line chart of the solver's best score over elapsed seconds, from the
/// `(elapsed, best_score)` convergence samples it logged.
pub fn convergence_chart(instance_name: &str, samples: &[(f64, f64)]) -> Document {
    let width = MARGIN * 2.0 + 420.0;
    let height = MARGIN * 2.0 + PLOT_HEIGHT;
    let max_elapsed = samples.iter().map(|s| s.0).fold(0.0f64, f64::max).max(1e-9);
    let max_score = samples.iter().map(|s| s.1).fold(0.0f64, f64::max).max(1.0);

    let points: String = samples
        .iter()
        .map(|&(elapsed, score)| {
            let x = MARGIN + (elapsed / max_elapsed) as f32 * 420.0;
            let y = MARGIN + PLOT_HEIGHT - (score / max_score) as f32 * PLOT_HEIGHT;
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    chart_frame(instance_name, width, height, max_score).add(
        Polyline::new()
            .set("points", points)
            .set("fill", "none")
            .set("stroke", SOLVER_COLOR)
            .set("stroke-width", 1.5),
    )
}

pub fn save_chart(path: &Path, document: &Document) -> Result<()> {
    svg::save(path, document).with_context(|| format!("Failed to write chart: {}", path.display()))
}

fn chart_frame(title: &str, width: f32, height: f32, max_score: f64) -> Document {
    let axis = |x1: f32, y1: f32, x2: f32, y2: f32| {
        Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", "#333333")
            .set("stroke-width", 1)
    };

    Document::new()
        .set("viewBox", (0.0f32, 0.0f32, width, height))
        .add(
            Text::new(title.to_string())
                .set("x", width / 2.0)
                .set("y", MARGIN / 2.0)
                .set("font-size", 13)
                .set("font-family", "monospace")
                .set("text-anchor", "middle"),
        )
        .add(axis(MARGIN, MARGIN, MARGIN, MARGIN + PLOT_HEIGHT))
        .add(axis(
            MARGIN,
            MARGIN + PLOT_HEIGHT,
            width - MARGIN,
            MARGIN + PLOT_HEIGHT,
        ))
        .add(
            Text::new(format!("{:.2}", max_score))
                .set("x", MARGIN - 4.0)
                .set("y", MARGIN + 4.0)
                .set("font-size", 9)
                .set("font-family", "monospace")
                .set("text-anchor", "end"),
        )
}

fn legend(width: f32) -> Group {
    let entries = [
        ("solver", SOLVER_COLOR),
        ("best", BEST_COLOR),
        ("baseline", BASELINE_COLOR),
    ];
    let mut group = Group::new();
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = MARGIN + i as f32 * 14.0;
        group = group
            .add(
                Rectangle::new()
                    .set("x", width - MARGIN - 70.0)
                    .set("y", y)
                    .set("width", 10)
                    .set("height", 10)
                    .set("fill", *color),
            )
            .add(
                Text::new(label.to_string())
                    .set("x", width - MARGIN - 56.0)
                    .set("y", y + 9.0)
                    .set("font-size", 10)
                    .set("font-family", "monospace"),
            );
    }
    group
}
