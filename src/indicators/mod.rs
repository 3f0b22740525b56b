//! Indicator Catalog
//!
//! Static mapping from indicator key (the checkbox name on the dashboard)
//! to the IBGE aggregate that backs it and its display metadata.
//!
//! ## Indicators
//!
//! - `populacao`: estimated resident population
//! - `renda`: average monthly household income per capita (state only)
//! - `escolaridade`: schooling rate by age group
//! - `saneamento`: households with adequate sanitation
//! - `idade`: resident population by age group

mod catalog;

pub use catalog::{
    catalog, lookup, ClassificationSpec, IndicatorConfig, IndicatorKind, LocationLevel,
};
