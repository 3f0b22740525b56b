//! Aggregate query builder
//!
//! Builds `/v3/agregados/{id}/periodos/{p}/variaveis/{v}` requests from an
//! indicator definition and a set of locations.

use crate::indicators::{IndicatorConfig, LocationLevel};

/// A single request against the aggregates endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateQuery {
    pub dataset_id: u32,
    pub period: String,
    pub variable_id: u32,
    pub level: LocationLevel,
    pub location_ids: Vec<u32>,
    /// Pre-rendered `classificacao` value, e.g. `58[all]`
    pub classification: Option<String>,
}

impl AggregateQuery {
    /// Query an indicator for the given locations at the given level
    pub fn for_indicator(config: &IndicatorConfig, level: LocationLevel, location_ids: Vec<u32>) -> Self {
        Self {
            dataset_id: config.dataset_id,
            period: config.period.to_string(),
            variable_id: config.variable_id,
            level,
            location_ids,
            classification: config.classification.map(|c| c.to_param()),
        }
    }

    /// Value of the `localidades` parameter, e.g. `N6[2111300,2105302]`
    pub fn localidades(&self) -> String {
        let ids: Vec<String> = self.location_ids.iter().map(|id| id.to_string()).collect();
        format!("{}[{}]", self.level.code(), ids.join(","))
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        format!(
            "/v3/agregados/{}/periodos/{}/variaveis/{}",
            self.dataset_id, self.period, self.variable_id
        )
    }

    /// Full request URL
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}{}?localidades={}",
            base_url.trim_end_matches('/'),
            self.path(),
            urlencoding::encode(&self.localidades())
        );
        if let Some(classification) = &self.classification {
            url.push_str("&classificacao=");
            url.push_str(&urlencoding::encode(classification));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::lookup;

    #[test]
    fn test_municipal_query() {
        let config = lookup("populacao").unwrap();
        let query = AggregateQuery::for_indicator(config, LocationLevel::Municipality, vec![2111300]);
        assert_eq!(query.localidades(), "N6[2111300]");
        assert_eq!(query.path(), "/v3/agregados/6579/periodos/2021/variaveis/9324");
        assert_eq!(
            query.url("https://servicodados.ibge.gov.br/api/"),
            "https://servicodados.ibge.gov.br/api/v3/agregados/6579/periodos/2021/variaveis/9324?localidades=N6%5B2111300%5D"
        );
    }

    #[test]
    fn test_multi_location_with_classification() {
        let config = lookup("idade").unwrap();
        let query = AggregateQuery::for_indicator(config, LocationLevel::State, vec![21, 22]);
        assert_eq!(query.localidades(), "N3[21,22]");
        assert!(query.url("http://x").ends_with("&classificacao=58%5Ball%5D"));
    }
}
