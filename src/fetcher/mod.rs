//! Data Fetcher
//!
//! Resolves an indicator, queries IBGE and normalizes the answer into
//! [`DataPoint`]s, degrading through a fixed chain of strategies:
//!
//! 1. municipal aggregate for the selected city
//! 2. state aggregate standing in for the city (when the indicator allows it)
//! 3. simulated values
//!
//! Errors never reach the caller. Every failure is logged and the next
//! strategy is tried; the caller always receives a list.

pub mod categories;
mod normalize;
mod simulate;
mod strategy;
mod types;

pub use categories::{AgeRange, CategoryValue};
pub use simulate::Simulator;
pub use strategy::{plan, FetchStrategy, FetchTarget};
pub use types::{City, DataPoint};

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Config;
use crate::ibge::{AggregateQuery, AggregateVariable, StatsSource};
use crate::indicators::{lookup, IndicatorConfig, LocationLevel};

/// Fetches and normalizes indicator data for the supported state
pub struct DataFetcher<S: StatsSource> {
    source: Arc<S>,
    state_code: u32,
    state_name: String,
    featured: Vec<City>,
    simulator: Simulator,
}

impl<S: StatsSource> DataFetcher<S> {
    pub fn new(source: Arc<S>, config: &Config) -> Self {
        Self {
            source,
            state_code: config.dashboard.state_code,
            state_name: config.dashboard.state_name.clone(),
            featured: config.dashboard.featured_cities.iter().map(City::from).collect(),
            simulator: Simulator::new(&config.simulation),
        }
    }

    /// Cities compared when no city is selected
    pub fn featured_cities(&self) -> &[City] {
        &self.featured
    }

    /// Fetch an indicator for a city, or for the whole state when `city`
    /// is `None`. Unknown indicators yield an empty list.
    pub async fn fetch_indicator(&self, key: &str, city: Option<&City>) -> Vec<DataPoint> {
        let Some(config) = lookup(key) else {
            tracing::warn!("Unknown indicator: {}", key);
            return Vec::new();
        };

        let target = match city {
            Some(city) => FetchTarget::City(city.clone()),
            None => FetchTarget::State,
        };
        self.run(config, target).await
    }

    /// Fetch an indicator for every featured city, sorted by value
    /// (descending). Classified indicators have no per-city ranking and
    /// return the state distribution instead.
    pub async fn fetch_ranking(&self, key: &str) -> Vec<DataPoint> {
        let Some(config) = lookup(key) else {
            tracing::warn!("Unknown indicator: {}", key);
            return Vec::new();
        };

        if config.kind.is_categorized() {
            return self.run(config, FetchTarget::State).await;
        }

        let mut points = self.run(config, FetchTarget::Ranking(self.featured.clone())).await;
        points.sort_by(|a, b| b.value.total_cmp(&a.value));
        points
    }

    async fn run(&self, config: &'static IndicatorConfig, target: FetchTarget) -> Vec<DataPoint> {
        let chain_id = Uuid::new_v4();
        let span = tracing::info_span!("fetch", chain = %chain_id, indicator = config.key);

        async move {
            for strategy in plan(config, &target, &self.state_name) {
                tracing::debug!("Trying {} strategy", strategy);
                if let Some(points) = self.attempt(config, &strategy).await {
                    tracing::info!(
                        strategy = strategy.name(),
                        records = points.len(),
                        "Fetch chain resolved"
                    );
                    return points;
                }
            }
            tracing::info!("Fetch chain produced no data");
            Vec::new()
        }
        .instrument(span)
        .await
    }

    async fn attempt(&self, config: &IndicatorConfig, strategy: &FetchStrategy) -> Option<Vec<DataPoint>> {
        match strategy {
            FetchStrategy::Municipal(city) => {
                let query = AggregateQuery::for_indicator(config, LocationLevel::Municipality, vec![city.id]);
                let vars = self.query(&query).await?;
                let points = normalize::single(config, &vars, Some(&city.name), false);
                if points.is_none() {
                    tracing::warn!("No municipal data for {} ({})", city.name, city.id);
                }
                points
            }
            FetchStrategy::State { stand_in_for } => {
                let query = AggregateQuery::for_indicator(config, LocationLevel::State, vec![self.state_code]);
                let vars = self.query(&query).await?;
                let name = stand_in_for.as_ref().map(|c| c.name.as_str());
                let points = normalize::single(config, &vars, name, stand_in_for.is_some());
                if points.is_none() {
                    tracing::warn!("No state data for {}", self.state_name);
                }
                points
            }
            FetchStrategy::Ranking(cities) => {
                let ids = cities.iter().map(|c| c.id).collect();
                let query = AggregateQuery::for_indicator(config, LocationLevel::Municipality, ids);
                let vars = self.query(&query).await?;
                normalize::ranking(config, &vars, cities)
            }
            FetchStrategy::Simulated(locations) => {
                tracing::warn!("Using simulated data for {}", config.key);
                let points = self.simulator.simulate(config, locations);
                (!points.is_empty()).then_some(points)
            }
        }
    }

    async fn query(&self, query: &AggregateQuery) -> Option<Vec<AggregateVariable>> {
        match self.source.aggregate(query).await {
            Ok(vars) => Some(vars),
            Err(e) => {
                tracing::warn!("Query {} for {} failed: {}", query.path(), query.localidades(), e);
                None
            }
        }
    }
}
