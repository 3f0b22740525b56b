//! Declarative chart options
//!
//! A Chart.js-shaped document describing one bar chart. The charting
//! front end consumes it as-is; nothing here draws pixels.

use serde::Serialize;

use super::format::format_value;
use crate::fetcher::DataPoint;
use crate::indicators::IndicatorConfig;

/// Bar fill for exact municipal data
pub const EXACT_COLOR: &str = "rgba(255, 152, 0, 0.85)";
/// Lighter fill for state-level or simulated data
pub const ESTIMATED_COLOR: &str = "rgba(255, 152, 0, 0.35)";
const BORDER_COLOR: &str = "rgba(255, 152, 0, 1)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSettings {
    pub responsive: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: TextOptions,
    pub subtitle: TextOptions,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOptions {
    pub display: bool,
    pub text: String,
}

impl TextOptions {
    fn shown(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }
}

/// Tooltip text, one entry per bar, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub title: TextOptions,
}

/// Provenance tag appended to tooltips
pub fn provenance_tag(point: &DataPoint) -> Option<&'static str> {
    if point.is_simulated {
        Some("simulado")
    } else if point.is_state_level {
        Some("estadual")
    } else {
        None
    }
}

/// Subtitle disclosing where the values came from
pub fn provenance_subtitle(points: &[DataPoint]) -> String {
    if points.iter().any(|p| p.is_simulated) {
        "Dados simulados: a API do IBGE não retornou valores utilizáveis".to_string()
    } else if points.iter().any(|p| p.is_state_level) {
        "Dados estaduais exibidos no lugar dos dados municipais".to_string()
    } else {
        "Fonte: IBGE".to_string()
    }
}

impl ChartOptions {
    /// Build bar chart options for already-prepared points
    pub fn bar(config: &IndicatorConfig, points: &[DataPoint]) -> Self {
        let title = match points {
            [single] if single.category.is_none() => {
                format!("{} - {}", config.display_name, single.location_name)
            }
            [first, ..] if first.category.is_some() => {
                format!("{} - {}", config.display_name, first.location_name)
            }
            _ => config.display_name.to_string(),
        };

        let tooltips = points
            .iter()
            .map(|p| {
                let text = format!("{}: {}", p.label(), format_value(p.value, &p.unit));
                match provenance_tag(p) {
                    Some(tag) => format!("{} ({})", text, tag),
                    None => text,
                }
            })
            .collect();

        Self {
            chart_type: "bar",
            data: ChartData {
                labels: points.iter().map(|p| p.label().to_string()).collect(),
                datasets: vec![Dataset {
                    label: format!("{} ({})", config.display_name, config.unit),
                    data: points.iter().map(|p| p.value).collect(),
                    background_color: points
                        .iter()
                        .map(|p| {
                            let color = if p.is_exact() { EXACT_COLOR } else { ESTIMATED_COLOR };
                            color.to_string()
                        })
                        .collect(),
                    border_color: BORDER_COLOR.to_string(),
                    border_width: 1,
                }],
            },
            options: ChartSettings {
                responsive: true,
                plugins: Plugins {
                    title: TextOptions::shown(title),
                    subtitle: TextOptions::shown(provenance_subtitle(points)),
                    tooltip: TooltipOptions { labels: tooltips },
                },
                scales: Scales {
                    y: Axis {
                        begin_at_zero: true,
                        title: TextOptions::shown(config.unit),
                    },
                },
            },
        }
    }
}
