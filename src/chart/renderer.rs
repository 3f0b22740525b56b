//! Chart Renderer
//!
//! Owns the single chart instance. Every render destroys the previous
//! chart and builds a new one from scratch.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::notice::Notice;
use super::options::ChartOptions;
use crate::config::Config;
use crate::fetcher::DataPoint;
use crate::indicators::{lookup, IndicatorConfig};

/// Message painted on the canvas when no indicator is selected
pub const PLACEHOLDER_TEXT: &str = "Selecione um indicador para visualizar os dados";

/// The currently rendered chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartState {
    pub indicator: &'static str,
    pub points: Vec<DataPoint>,
    pub options: ChartOptions,
    pub notice: Option<Notice>,
    pub rendered_at: DateTime<Utc>,
}

/// What the chart area currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Canvas {
    #[default]
    Empty,
    Chart(ChartState),
    Placeholder(String),
}

pub struct ChartRenderer {
    canvas: Canvas,
    top_n: usize,
    notice_ttl: Duration,
}

/// Order points for display
///
/// Categorized points keep their display order. Location points are sorted
/// descending by value and truncated to `top_n`.
pub fn prepare(mut points: Vec<DataPoint>, top_n: usize) -> Vec<DataPoint> {
    if points.len() <= 1 || points.iter().any(|p| p.category.is_some()) {
        return points;
    }
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    points.truncate(top_n);
    points
}

impl ChartRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            canvas: Canvas::Empty,
            top_n: config.dashboard.top_n,
            notice_ttl: Duration::seconds(config.chart.notice_ttl_secs),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The chart instance, if one is drawn
    pub fn current(&self) -> Option<&ChartState> {
        match &self.canvas {
            Canvas::Chart(state) => Some(state),
            _ => None,
        }
    }

    /// Replace the current chart with one built from `points`
    ///
    /// Returns `None` (and leaves the canvas empty) for an unknown
    /// indicator or an empty dataset.
    pub fn render(&mut self, points: Vec<DataPoint>, indicator: &str) -> Option<&ChartState> {
        self.destroy();

        let Some(config) = lookup(indicator) else {
            tracing::warn!("Cannot render unknown indicator {}", indicator);
            return None;
        };
        if points.is_empty() {
            tracing::debug!("Nothing to render for {}", indicator);
            return None;
        }

        let state = self.build(config, points, Utc::now());
        tracing::debug!(
            indicator = state.indicator,
            bars = state.points.len(),
            "Chart rendered"
        );
        self.canvas = Canvas::Chart(state);
        self.current()
    }

    fn build(&self, config: &'static IndicatorConfig, points: Vec<DataPoint>, now: DateTime<Utc>) -> ChartState {
        let points = prepare(points, self.top_n);
        ChartState {
            indicator: config.key,
            options: ChartOptions::bar(config, &points),
            notice: Notice::for_points(&points, now, self.notice_ttl),
            points,
            rendered_at: now,
        }
    }

    /// Drop the current chart instance
    pub fn destroy(&mut self) {
        self.canvas = Canvas::Empty;
    }

    /// Paint a message where the chart would be
    pub fn paint_placeholder(&mut self, message: &str) {
        self.canvas = Canvas::Placeholder(message.to_string());
    }

    /// Dismiss the notice of the current chart
    pub fn dismiss_notice(&mut self) {
        if let Canvas::Chart(state) = &mut self.canvas {
            state.notice = None;
        }
    }

    /// Drop the notice once its time is up
    pub fn expire_notice(&mut self, now: DateTime<Utc>) {
        if let Canvas::Chart(state) = &mut self.canvas {
            if state.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
                state.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::NoticeKind;

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(&Config::default())
    }

    fn cities(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| DataPoint::new(format!("C{i}"), (i * 10) as f64, "habitantes"))
            .collect()
    }

    #[test]
    fn test_single_record() {
        let mut r = renderer();
        let state = r
            .render(vec![DataPoint::new("Timon", 171_317.0, "habitantes")], "populacao")
            .unwrap();
        assert_eq!(state.options.data.labels, vec!["Timon"]);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_top_ten_descending() {
        let mut r = renderer();
        let state = r.render(cities(15), "populacao").unwrap();

        assert_eq!(state.points.len(), 10);
        assert_eq!(state.points[0].location_name, "C14");
        assert!(state.points.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_categories_keep_order() {
        let points = vec![
            DataPoint::new("São Luís", 1.0, "habitantes").category("0 a 4 anos"),
            DataPoint::new("São Luís", 9.0, "habitantes").category("5 a 9 anos"),
        ];
        let prepared = prepare(points.clone(), 10);
        assert_eq!(prepared, points);
    }

    #[test]
    fn test_render_replaces_previous_chart() {
        let mut r = renderer();
        r.render(cities(3), "populacao");
        r.render(vec![DataPoint::new("Caxias", 40.0, "%").simulated()], "saneamento");

        let state = r.current().unwrap();
        assert_eq!(state.indicator, "saneamento");
        assert_eq!(state.points.len(), 1);
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Simulated);
    }

    #[test]
    fn test_empty_or_unknown_leaves_canvas_empty() {
        let mut r = renderer();
        r.render(cities(3), "populacao");
        assert!(r.render(Vec::new(), "populacao").is_none());
        assert_eq!(r.canvas(), &Canvas::Empty);
        assert!(r.render(cities(3), "pib").is_none());
        assert_eq!(r.canvas(), &Canvas::Empty);
    }

    #[test]
    fn test_placeholder_and_notice_lifecycle() {
        let mut r = renderer();
        r.render(vec![DataPoint::new("Codó", 1.0, "%").state_level()], "saneamento");
        let expires = r.current().unwrap().notice.as_ref().unwrap().expires_at;

        r.expire_notice(expires - Duration::seconds(1));
        assert!(r.current().unwrap().notice.is_some());
        r.expire_notice(expires);
        assert!(r.current().unwrap().notice.is_none());

        r.paint_placeholder(PLACEHOLDER_TEXT);
        assert_eq!(r.canvas(), &Canvas::Placeholder(PLACEHOLDER_TEXT.to_string()));
        assert!(r.current().is_none());
    }
}
