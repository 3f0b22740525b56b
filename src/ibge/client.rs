//! IBGE REST API Client
//!
//! HTTP client for the IBGE service data API (localidades and agregados).

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::dto::{AggregateVariable, Municipality};
use super::query::AggregateQuery;
use super::StatsSource;
use crate::config::IbgeConfig;

/// IBGE service data API client
pub struct IbgeClient {
    client: Client,
    config: IbgeConfig,
}

impl IbgeClient {
    /// Create a new client with the given configuration
    pub fn new(config: IbgeConfig) -> Result<Self, IbgeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(IbgeError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &IbgeConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// GET a URL and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, IbgeError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(IbgeError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(|e| IbgeError::Parse(e.to_string()))
    }
}

fn classify(e: reqwest::Error) -> IbgeError {
    if e.is_timeout() {
        IbgeError::Timeout
    } else if e.is_connect() {
        IbgeError::Unavailable
    } else {
        IbgeError::Request(e)
    }
}

#[async_trait]
impl StatsSource for IbgeClient {
    async fn municipalities(&self, state_code: u32) -> Result<Vec<Municipality>, IbgeError> {
        let url = format!(
            "{}/v1/localidades/estados/{}/municipios",
            self.base_url(),
            state_code
        );
        self.get_json(&url).await
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateVariable>, IbgeError> {
        let url = query.url(self.base_url());
        self.get_json(&url).await
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the IBGE API
#[derive(Error, Debug)]
pub enum IbgeError {
    #[error("IBGE API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected response: {0}")]
    Parse(String),
}
