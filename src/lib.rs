//! # IBGE Dashboard
//!
//! Indicator dashboard for Brazilian municipalities. Fetches population,
//! income, schooling, sanitation and age-distribution statistics from the
//! IBGE service data API and turns them into bar charts.
//!
//! ## Features
//!
//! - **Indicator catalog**: static mapping from indicator to IBGE aggregate
//! - **Fallback chain**: municipal data, then state data, then simulated values
//! - **Chart model**: Chart.js-style options with provenance disclosure
//! - **Typed view-model**: mutually exclusive indicator checkboxes, city selector
//!
//! ## Modules
//!
//! - [`ibge`]: API client and response types
//! - [`indicators`]: indicator catalog
//! - [`fetcher`]: strategy chain and normalization
//! - [`chart`]: chart renderer and output targets
//! - [`dashboard`]: event wiring
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ibge_dashboard::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = Arc::new(IbgeClient::new(config.ibge.clone())?);
//!
//!     let mut dashboard = Dashboard::init(client, &config).await;
//!     dashboard.handle(UiEvent::CitySelected { city_id: Some(2111300) }).await;
//!     dashboard
//!         .handle(UiEvent::IndicatorToggled { key: "populacao".into(), checked: true })
//!         .await;
//!
//!     if let Some(chart) = dashboard.chart() {
//!         println!("{}", chart::terminal::draw(chart, 40));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod fetcher;
pub mod ibge;
pub mod indicators;

// Re-export top-level types for convenience
pub use chart::{Canvas, ChartOptions, ChartRenderer, ChartState, Notice, NoticeKind};

pub use config::{Config, ConfigError, FeaturedCity, LoggingConfig};

pub use dashboard::{CityLoader, Dashboard, EventParseError, SelectOption, UiEvent, ViewModel};

pub use fetcher::{City, DataFetcher, DataPoint, FetchStrategy, FetchTarget, Simulator};

pub use ibge::{AggregateQuery, IbgeClient, IbgeError, Municipality, StatsSource};

pub use indicators::{IndicatorConfig, IndicatorKind, LocationLevel};
