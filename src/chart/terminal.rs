//! Terminal rendering of the chart canvas

use super::format::format_value;
use super::options::provenance_tag;
use super::renderer::{Canvas, ChartState};

const EXACT_BAR: char = '█';
const ESTIMATED_BAR: char = '░';

/// Draw a chart as horizontal bars, the longest one `width` cells wide
pub fn draw(state: &ChartState, width: usize) -> String {
    let plugins = &state.options.options.plugins;
    let mut out = format!("{}\n{}\n\n", plugins.title.text, plugins.subtitle.text);

    let label_width = state
        .points
        .iter()
        .map(|p| p.label().chars().count())
        .max()
        .unwrap_or(0);
    let max = state.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    for point in &state.points {
        let cells = if max > 0.0 {
            ((point.value / max) * width as f64).round() as usize
        } else {
            0
        };
        let glyph = if point.is_exact() { EXACT_BAR } else { ESTIMATED_BAR };
        let bar: String = std::iter::repeat(glyph).take(cells).collect();
        let pad = label_width - point.label().chars().count();

        out.push_str(&format!(
            "{}{} │{} {}",
            point.label(),
            " ".repeat(pad),
            bar,
            format_value(point.value, &point.unit)
        ));
        if let Some(tag) = provenance_tag(point) {
            out.push_str(&format!(" ({})", tag));
        }
        out.push('\n');
    }

    if let Some(notice) = &state.notice {
        out.push_str(&format!("\n! {}\n", notice.message));
    }
    out
}

/// Draw whatever the canvas holds
pub fn draw_canvas(canvas: &Canvas, width: usize) -> String {
    match canvas {
        Canvas::Empty => String::new(),
        Canvas::Placeholder(message) => format!("{}\n", message),
        Canvas::Chart(state) => draw(state, width),
    }
}
