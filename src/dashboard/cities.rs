//! City Loader
//!
//! Fills the city selector from the IBGE location catalog.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::fetcher::City;
use crate::ibge::StatsSource;

pub const CITY_PLACEHOLDER: &str = "Selecione uma cidade";
pub const CITY_LOAD_ERROR: &str = "Erro ao carregar cidades";

/// One `<option>` of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn placeholder() -> Self {
        Self::new("", CITY_PLACEHOLDER)
    }

    /// The city behind this option, unless it is a placeholder
    pub fn city(&self) -> Option<City> {
        self.value.parse().ok().map(|id| City::new(id, self.label.clone()))
    }
}

/// Accent-insensitive, case-insensitive sort key for Portuguese names
pub fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Locale-style comparison: accents and case only break ties
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Loads municipalities of the supported state into selector options
pub struct CityLoader<S: StatsSource> {
    source: Arc<S>,
    supported_state: String,
    state_code: u32,
}

impl<S: StatsSource> CityLoader<S> {
    pub fn new(source: Arc<S>, config: &DashboardConfig) -> Self {
        Self {
            source,
            supported_state: config.state.to_uppercase(),
            state_code: config.state_code,
        }
    }

    pub fn supports(&self, state: &str) -> bool {
        state.eq_ignore_ascii_case(&self.supported_state)
    }

    /// Options for the city selector of `state`
    ///
    /// Always starts from a cleared selector. Unsupported states get only
    /// the placeholder; a failed load gets a single error option.
    pub async fn load(&self, state: &str) -> Vec<SelectOption> {
        if !self.supports(state) {
            return vec![SelectOption::placeholder()];
        }

        match self.source.municipalities(self.state_code).await {
            Ok(mut cities) => {
                cities.sort_by(|a, b| compare_names(&a.name, &b.name));
                tracing::info!("Loaded {} cities for {}", cities.len(), self.supported_state);

                let mut options = Vec::with_capacity(cities.len() + 1);
                options.push(SelectOption::placeholder());
                options.extend(
                    cities
                        .into_iter()
                        .map(|c| SelectOption::new(c.id.to_string(), c.name)),
                );
                options
            }
            Err(e) => {
                tracing::error!("Failed to load cities: {}", e);
                vec![SelectOption::new("", CITY_LOAD_ERROR)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ibge::stub::StubSource;

    fn loader(source: StubSource) -> CityLoader<StubSource> {
        CityLoader::new(Arc::new(source), &DashboardConfig::default())
    }

    #[test]
    fn test_collation_ignores_accents() {
        assert_eq!(collation_key("Água Doce"), "agua doce");
        assert_eq!(compare_names("Água Doce do Maranhão", "Alcântara"), Ordering::Less);
        assert_eq!(compare_names("Çucuí", "Codó"), Ordering::Greater);
    }

    #[tokio::test]
    async fn test_sorted_with_placeholder_first() {
        let source = StubSource::default().with_municipalities(&[
            (2111300, "São Luís"),
            (2100204, "Alcântara"),
            (2100105, "Água Doce do Maranhão"),
            (2105302, "Imperatriz"),
        ]);

        let options = loader(source).load("MA").await;
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![CITY_PLACEHOLDER, "Água Doce do Maranhão", "Alcântara", "Imperatriz", "São Luís"]
        );
        assert_eq!(options[1].city(), Some(City::new(2100105, "Água Doce do Maranhão")));
        assert_eq!(options[0].city(), None);
    }

    #[tokio::test]
    async fn test_error_placeholder() {
        let options = loader(StubSource::unreachable()).load("ma").await;
        assert_eq!(options, vec![SelectOption::new("", CITY_LOAD_ERROR)]);
    }

    #[tokio::test]
    async fn test_unsupported_state() {
        let source = StubSource::default().with_municipalities(&[(1, "X")]);
        let options = loader(source).load("PI").await;
        assert_eq!(options, vec![SelectOption::placeholder()]);
    }
}
