//! Normalized record types

use serde::Serialize;

use crate::config::FeaturedCity;
use crate::ibge::Municipality;

/// A municipality the user can select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: u32,
    pub name: String,
}

impl City {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<Municipality> for City {
    fn from(m: Municipality) -> Self {
        Self::new(m.id, m.name)
    }
}

impl From<&FeaturedCity> for City {
    fn from(c: &FeaturedCity) -> Self {
        Self::new(c.id, c.name.clone())
    }
}

/// One normalized indicator value, ready for charting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub location_name: String,
    /// Always finite; unparseable values are stored as 0
    pub value: f64,
    pub unit: String,
    /// Value is a statewide aggregate standing in for a city
    pub is_state_level: bool,
    /// Value was generated because the API yielded nothing usable
    pub is_simulated: bool,
    /// IBGE location code the value came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    /// Category label for classified indicators (e.g. an age group)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DataPoint {
    pub fn new(location_name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            location_name: location_name.into(),
            value: if value.is_finite() { value } else { 0.0 },
            unit: unit.into(),
            is_state_level: false,
            is_simulated: false,
            source_code: None,
            category: None,
        }
    }

    pub fn state_level(mut self) -> Self {
        self.is_state_level = true;
        self
    }

    pub fn simulated(mut self) -> Self {
        self.is_simulated = true;
        self
    }

    pub fn source(mut self, code: impl Into<String>) -> Self {
        self.source_code = Some(code.into());
        self
    }

    pub fn category(mut self, label: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self
    }

    /// Bar label: the category when present, else the location
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.location_name)
    }

    /// Whether the value is real municipal data
    pub fn is_exact(&self) -> bool {
        !self.is_state_level && !self.is_simulated
    }
}
