//! IBGE Integration
//!
//! Access to the IBGE service data API.
//!
//! ## Architecture
//!
//! - **StatsSource**: the seam the fetcher and city loader depend on
//! - **IbgeClient**: reqwest implementation of [`StatsSource`]
//! - **AggregateQuery**: builds `agregados` requests from an indicator
//!
//! ## Endpoints
//!
//! 1. `/v1/localidades/estados/{uf}/municipios` for the city catalog
//! 2. `/v3/agregados/{id}/periodos/{p}/variaveis/{v}` for indicator values

mod client;
mod dto;
mod query;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{IbgeClient, IbgeError};
pub use dto::{
    parse_value, AggregateResult, AggregateVariable, Classification, Level, Municipality, Series,
    SeriesLocation,
};
pub use query::AggregateQuery;

use async_trait::async_trait;

/// A source of IBGE statistics
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Municipalities of a state, in API order
    async fn municipalities(&self, state_code: u32) -> Result<Vec<Municipality>, IbgeError>;

    /// Run an aggregate query
    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateVariable>, IbgeError>;
}
