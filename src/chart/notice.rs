//! Provenance notices
//!
//! The transient banner shown when a chart is not backed by exact
//! municipal data.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::fetcher::DataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Simulated,
    StateLevel,
}

/// A dismissible banner that expires on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Notice for a dataset, if any point is simulated or state-level.
    /// Simulated data takes precedence.
    pub fn for_points(points: &[DataPoint], now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let (kind, message) = if points.iter().any(|p| p.is_simulated) {
            (
                NoticeKind::Simulated,
                "Não foi possível obter dados do IBGE. Exibindo valores simulados.",
            )
        } else if points.iter().any(|p| p.is_state_level) {
            (
                NoticeKind::StateLevel,
                "Dados municipais indisponíveis. Exibindo dados do estado.",
            )
        } else {
            return None;
        };

        Some(Self {
            kind,
            message: message.to_string(),
            expires_at: now + ttl,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
