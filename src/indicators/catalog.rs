//! Indicator definitions
//!
//! Each entry maps an indicator key to the IBGE aggregate (`agregado`),
//! variable, period and geographic level used to query it.

use serde::Serialize;
use std::fmt;

/// Geographic level of an IBGE query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    /// Municipality (`N6`)
    Municipality,
    /// Federation unit (`N3`)
    State,
}

impl LocationLevel {
    /// IBGE level code used in the `localidades` parameter
    pub fn code(&self) -> &'static str {
        match self {
            LocationLevel::Municipality => "N6",
            LocationLevel::State => "N3",
        }
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Shape of the data an indicator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// One value per location
    Scalar,
    /// Population broken down by age group
    AgeDistribution,
    /// Schooling rate broken down by age group
    SchoolingByAge,
}

impl IndicatorKind {
    /// Whether results are split by a classification dimension
    pub fn is_categorized(&self) -> bool {
        !matches!(self, IndicatorKind::Scalar)
    }
}

/// Classification dimension requested with `classificacao=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationSpec {
    pub id: u32,
    /// Category filter, e.g. `all` or a comma-separated list of codes
    pub categories: &'static str,
}

impl ClassificationSpec {
    /// Render as the `classificacao` query value, e.g. `58[all]`
    pub fn to_param(&self) -> String {
        format!("{}[{}]", self.id, self.categories)
    }
}

/// Static description of an indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorConfig {
    pub key: &'static str,
    pub display_name: &'static str,
    /// IBGE aggregate (table) id
    pub dataset_id: u32,
    pub variable_id: u32,
    pub period: &'static str,
    /// Preferred query level
    pub location_level: LocationLevel,
    pub unit: &'static str,
    /// Substitute the state aggregate when municipal data is missing
    pub fallback_to_state: bool,
    /// Only published at state level; municipal queries are skipped
    pub state_only: bool,
    pub kind: IndicatorKind,
    pub classification: Option<ClassificationSpec>,
}

impl IndicatorConfig {
    /// Whether values are monetary (formatted as BRL)
    pub fn is_currency(&self) -> bool {
        self.unit == "R$"
    }
}

static CATALOG: [IndicatorConfig; 5] = [
    IndicatorConfig {
        key: "populacao",
        display_name: "População estimada",
        dataset_id: 6579,
        variable_id: 9324,
        period: "2021",
        location_level: LocationLevel::Municipality,
        unit: "habitantes",
        fallback_to_state: true,
        state_only: false,
        kind: IndicatorKind::Scalar,
        classification: None,
    },
    IndicatorConfig {
        key: "renda",
        display_name: "Rendimento médio mensal per capita",
        dataset_id: 7531,
        variable_id: 10826,
        period: "2022",
        location_level: LocationLevel::State,
        unit: "R$",
        fallback_to_state: true,
        state_only: true,
        kind: IndicatorKind::Scalar,
        classification: None,
    },
    IndicatorConfig {
        key: "escolaridade",
        display_name: "Taxa de escolarização por faixa etária",
        dataset_id: 3540,
        variable_id: 3795,
        period: "2010",
        location_level: LocationLevel::Municipality,
        unit: "%",
        fallback_to_state: true,
        state_only: false,
        kind: IndicatorKind::SchoolingByAge,
        classification: Some(ClassificationSpec {
            id: 58,
            categories: "all",
        }),
    },
    IndicatorConfig {
        key: "saneamento",
        display_name: "Domicílios com esgotamento sanitário adequado",
        dataset_id: 3218,
        variable_id: 1000096,
        period: "2010",
        location_level: LocationLevel::Municipality,
        unit: "%",
        fallback_to_state: true,
        state_only: false,
        kind: IndicatorKind::Scalar,
        classification: None,
    },
    IndicatorConfig {
        key: "idade",
        display_name: "População por faixa etária",
        dataset_id: 200,
        variable_id: 93,
        period: "2010",
        location_level: LocationLevel::Municipality,
        unit: "habitantes",
        fallback_to_state: false,
        state_only: false,
        kind: IndicatorKind::AgeDistribution,
        classification: Some(ClassificationSpec {
            id: 58,
            categories: "all",
        }),
    },
];

/// All indicators, in checkbox order
pub fn catalog() -> &'static [IndicatorConfig] {
    &CATALOG
}

/// Resolve an indicator by key
pub fn lookup(key: &str) -> Option<&'static IndicatorConfig> {
    CATALOG.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let pop = lookup("populacao").unwrap();
        assert_eq!(pop.dataset_id, 6579);
        assert_eq!(pop.location_level, LocationLevel::Municipality);
        assert!(lookup("pib").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = catalog().iter().map(|c| c.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), catalog().len());
    }

    #[test]
    fn test_categorized_indicators_carry_classification() {
        for config in catalog() {
            assert_eq!(
                config.kind.is_categorized(),
                config.classification.is_some(),
                "{}",
                config.key
            );
        }
    }

    #[test]
    fn test_state_only_income() {
        let renda = lookup("renda").unwrap();
        assert!(renda.state_only);
        assert!(renda.is_currency());
        assert_eq!(renda.location_level.code(), "N3");
    }

    #[test]
    fn test_classification_param() {
        let idade = lookup("idade").unwrap();
        assert_eq!(idade.classification.unwrap().to_param(), "58[all]");
    }
}
