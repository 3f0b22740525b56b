//! IBGE response DTOs
//!
//! Field names follow the Portuguese JSON keys of the service data API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A municipality from `/v1/localidades/estados/{uf}/municipios`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Municipality {
    pub id: u32,
    #[serde(rename = "nome")]
    pub name: String,
}

/// One variable block of an aggregate response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregateVariable {
    pub id: String,
    #[serde(rename = "variavel", default)]
    pub name: String,
    #[serde(rename = "unidade", default)]
    pub unit: String,
    #[serde(rename = "resultados", default)]
    pub results: Vec<AggregateResult>,
}

/// A result group; categorized queries produce one per category
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregateResult {
    #[serde(rename = "classificacoes", default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// Classification dimension with its category (code -> label)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Classification {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub categories: BTreeMap<String, String>,
}

/// Values of one location across periods
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Series {
    #[serde(rename = "localidade")]
    pub location: SeriesLocation,
    /// Period -> raw value. IBGE sends numbers as strings and uses
    /// markers such as `-`, `...` or `X` for missing data.
    #[serde(rename = "serie", default)]
    pub values: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesLocation {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "nivel", default)]
    pub level: Option<Level>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Level {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
}

impl Series {
    /// Raw value for a period, or the first available one
    pub fn raw_value(&self, period: &str) -> Option<&str> {
        self.values
            .get(period)
            .and_then(|v| v.as_deref())
            .or_else(|| self.values.values().find_map(|v| v.as_deref()))
    }
}

impl SeriesLocation {
    /// Location name without the trailing ` - UF` suffix
    pub fn display_name(&self) -> &str {
        match self.name.rsplit_once(" - ") {
            Some((name, uf)) if uf.len() == 2 => name,
            _ => &self.name,
        }
    }
}

/// Parse an IBGE value string; anything non-numeric becomes 0
pub fn parse_value(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{
        "id": "9324",
        "variavel": "População residente estimada",
        "unidade": "Pessoas",
        "resultados": [{
            "classificacoes": [],
            "series": [{
                "localidade": {
                    "id": "2111300",
                    "nivel": {"id": "N6", "nome": "Município"},
                    "nome": "São Luís - MA"
                },
                "serie": {"2021": "1115932"}
            }]
        }]
    }]"#;

    #[test]
    fn test_deserialize_aggregate() {
        let vars: Vec<AggregateVariable> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(vars.len(), 1);
        let series = &vars[0].results[0].series[0];
        assert_eq!(series.location.display_name(), "São Luís");
        assert_eq!(series.raw_value("2021"), Some("1115932"));
        assert_eq!(series.raw_value("2020"), Some("1115932"));
    }

    #[test]
    fn test_deserialize_municipality_ignores_extra_fields() {
        let json = r#"[{"id": 2100055, "nome": "Açailândia", "microrregiao": {"id": 21010}}]"#;
        let list: Vec<Municipality> = serde_json::from_str(json).unwrap();
        assert_eq!(list[0].id, 2100055);
        assert_eq!(list[0].name, "Açailândia");
    }

    #[test]
    fn test_parse_value_markers() {
        assert_eq!(parse_value(Some("1234.5")), 1234.5);
        assert_eq!(parse_value(Some("-")), 0.0);
        assert_eq!(parse_value(Some("...")), 0.0);
        assert_eq!(parse_value(Some("X")), 0.0);
        assert_eq!(parse_value(Some("NaN")), 0.0);
        assert_eq!(parse_value(None), 0.0);
    }

    #[test]
    fn test_display_name_without_suffix() {
        let loc = SeriesLocation {
            id: "21".into(),
            name: "Maranhão".into(),
            level: None,
        };
        assert_eq!(loc.display_name(), "Maranhão");
    }
}
