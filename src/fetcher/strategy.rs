//! Fetch strategies
//!
//! A fetch is planned as an ordered list of strategies. The fetcher tries
//! them in order and keeps the first one that yields data.

use std::fmt;

use super::types::City;
use crate::indicators::IndicatorConfig;

/// What the user asked to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// A single municipality
    City(City),
    /// The whole supported state
    State,
    /// A comparison across several municipalities
    Ranking(Vec<City>),
}

/// One tier of the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Municipal aggregate for one city
    Municipal(City),
    /// State aggregate, optionally standing in for a city
    State { stand_in_for: Option<City> },
    /// Municipal aggregate for several cities in one query
    Ranking(Vec<City>),
    /// Generated values for the named locations
    Simulated(Vec<String>),
}

impl FetchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            FetchStrategy::Municipal(_) => "municipal",
            FetchStrategy::State { stand_in_for: None } => "state",
            FetchStrategy::State { .. } => "state_stand_in",
            FetchStrategy::Ranking(_) => "ranking",
            FetchStrategy::Simulated(_) => "simulated",
        }
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plan the strategy chain for an indicator and target
pub fn plan(config: &IndicatorConfig, target: &FetchTarget, state_name: &str) -> Vec<FetchStrategy> {
    match target {
        FetchTarget::City(city) => {
            let mut chain = Vec::with_capacity(3);
            if !config.state_only {
                chain.push(FetchStrategy::Municipal(city.clone()));
            }
            if config.state_only || config.fallback_to_state {
                chain.push(FetchStrategy::State {
                    stand_in_for: Some(city.clone()),
                });
            }
            chain.push(FetchStrategy::Simulated(vec![city.name.clone()]));
            chain
        }
        FetchTarget::State => vec![
            FetchStrategy::State { stand_in_for: None },
            FetchStrategy::Simulated(vec![state_name.to_string()]),
        ],
        FetchTarget::Ranking(cities) if cities.is_empty() => Vec::new(),
        FetchTarget::Ranking(cities) => {
            let names = cities.iter().map(|c| c.name.clone()).collect();
            if config.state_only {
                vec![FetchStrategy::Simulated(names)]
            } else {
                vec![
                    FetchStrategy::Ranking(cities.clone()),
                    FetchStrategy::Simulated(names),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::lookup;

    fn names(chain: &[FetchStrategy]) -> Vec<&'static str> {
        chain.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_city_with_state_fallback() {
        let config = lookup("populacao").unwrap();
        let chain = plan(config, &FetchTarget::City(City::new(1, "A")), "Maranhão");
        assert_eq!(names(&chain), vec!["municipal", "state_stand_in", "simulated"]);
        assert_eq!(chain[2], FetchStrategy::Simulated(vec!["A".into()]));
    }

    #[test]
    fn test_city_without_state_fallback() {
        let config = lookup("idade").unwrap();
        let chain = plan(config, &FetchTarget::City(City::new(1, "A")), "Maranhão");
        assert_eq!(names(&chain), vec!["municipal", "simulated"]);
    }

    #[test]
    fn test_state_only_skips_municipal() {
        let config = lookup("renda").unwrap();
        let chain = plan(config, &FetchTarget::City(City::new(1, "A")), "Maranhão");
        assert_eq!(names(&chain), vec!["state_stand_in", "simulated"]);

        let ranking = plan(config, &FetchTarget::Ranking(vec![City::new(1, "A")]), "Maranhão");
        assert_eq!(names(&ranking), vec!["simulated"]);
    }

    #[test]
    fn test_state_target() {
        let config = lookup("saneamento").unwrap();
        let chain = plan(config, &FetchTarget::State, "Maranhão");
        assert_eq!(names(&chain), vec!["state", "simulated"]);
        assert_eq!(chain[1], FetchStrategy::Simulated(vec!["Maranhão".into()]));
    }

    #[test]
    fn test_empty_ranking_plans_nothing() {
        let config = lookup("populacao").unwrap();
        assert!(plan(config, &FetchTarget::Ranking(vec![]), "Maranhão").is_empty());
    }
}
