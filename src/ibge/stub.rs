//! In-memory [`StatsSource`] for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{AggregateQuery, AggregateVariable, IbgeError, Municipality, StatsSource};
use crate::indicators::LocationLevel;

/// Canned responses keyed by `localidades` value
#[derive(Default)]
pub struct StubSource {
    pub municipalities: Option<Vec<Municipality>>,
    aggregates: HashMap<String, String>,
    pub requests: Mutex<Vec<String>>,
}

impl StubSource {
    /// A source where every call fails as if the network were down
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_municipalities(mut self, list: &[(u32, &str)]) -> Self {
        self.municipalities = Some(
            list.iter()
                .map(|(id, name)| Municipality {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
        );
        self
    }

    /// Respond to queries whose `localidades` equals `localidades`
    pub fn with_aggregate(mut self, localidades: &str, body: &str) -> Self {
        self.aggregates.insert(localidades.to_string(), body.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_levels(&self) -> Vec<LocationLevel> {
        self.requested()
            .iter()
            .map(|l| {
                if l.starts_with("N6") {
                    LocationLevel::Municipality
                } else {
                    LocationLevel::State
                }
            })
            .collect()
    }
}

/// Single-series scalar response body
pub fn scalar_body(location_id: &str, location_name: &str, period: &str, value: &str) -> String {
    format!(
        r#"[{{"id": "1", "variavel": "v", "unidade": "u", "resultados": [
            {{"classificacoes": [], "series": [
                {{"localidade": {{"id": "{location_id}", "nome": "{location_name}"}}, "serie": {{"{period}": "{value}"}}}}
            ]}}
        ]}}]"#
    )
}

/// Categorized response body, one result per (code, label, value)
pub fn categorized_body(location_id: &str, period: &str, categories: &[(&str, &str, &str)]) -> String {
    let results: Vec<String> = categories
        .iter()
        .map(|(code, label, value)| {
            format!(
                r#"{{"classificacoes": [{{"id": "58", "nome": "Grupo de idade", "categoria": {{"{code}": "{label}"}}}}],
                    "series": [{{"localidade": {{"id": "{location_id}", "nome": "X - MA"}}, "serie": {{"{period}": "{value}"}}}}]}}"#
            )
        })
        .collect();
    format!(
        r#"[{{"id": "93", "variavel": "v", "unidade": "u", "resultados": [{}]}}]"#,
        results.join(",")
    )
}

#[async_trait]
impl StatsSource for StubSource {
    async fn municipalities(&self, _state_code: u32) -> Result<Vec<Municipality>, IbgeError> {
        self.municipalities.clone().ok_or(IbgeError::Unavailable)
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateVariable>, IbgeError> {
        let key = query.localidades();
        self.requests.lock().unwrap().push(key.clone());
        match self.aggregates.get(&key) {
            Some(body) => serde_json::from_str(body).map_err(|e| IbgeError::Parse(e.to_string())),
            None => Err(IbgeError::ApiError {
                status: 500,
                message: "no stub".into(),
            }),
        }
    }
}
