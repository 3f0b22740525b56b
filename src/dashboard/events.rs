//! UI events
//!
//! Everything the page controls can emit. Events arrive either as JSON
//! (`{"type": "indicator_toggled", "key": "renda", "checked": true}`) or
//! as short text commands (`check renda`).

use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// State selector changed
    StateSelected { state: String },
    /// City selector changed; `None` is the placeholder option
    CitySelected { city_id: Option<u32> },
    /// An indicator checkbox changed
    IndicatorToggled { key: String, checked: bool },
    /// "Limpar filtros" button
    ClearFilters,
    /// Close button of the provenance notice
    DismissNotice,
    /// Clock tick; expires stale notices
    Tick,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid city id: {0}")]
    InvalidCityId(String),

    #[error("Invalid JSON event: {0}")]
    Json(String),
}

impl FromStr for UiEvent {
    type Err = EventParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.starts_with('{') {
            return serde_json::from_str(line).map_err(|e| EventParseError::Json(e.to_string()));
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().ok_or(EventParseError::Empty)?;
        let arg = parts.next();

        match command.to_lowercase().as_str() {
            "state" => Ok(UiEvent::StateSelected {
                state: arg.ok_or(EventParseError::MissingArgument("state"))?.to_string(),
            }),
            "city" => {
                let city_id = arg
                    .map(|a| {
                        a.parse::<u32>()
                            .map_err(|_| EventParseError::InvalidCityId(a.to_string()))
                    })
                    .transpose()?;
                Ok(UiEvent::CitySelected { city_id })
            }
            "check" | "uncheck" => Ok(UiEvent::IndicatorToggled {
                key: arg
                    .ok_or(EventParseError::MissingArgument("check"))?
                    .to_string(),
                checked: command.eq_ignore_ascii_case("check"),
            }),
            "clear" => Ok(UiEvent::ClearFilters),
            "dismiss" => Ok(UiEvent::DismissNotice),
            "tick" => Ok(UiEvent::Tick),
            other => Err(EventParseError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_commands() {
        assert_eq!(
            "state ma".parse::<UiEvent>(),
            Ok(UiEvent::StateSelected { state: "ma".into() })
        );
        assert_eq!(
            "city 2111300".parse::<UiEvent>(),
            Ok(UiEvent::CitySelected { city_id: Some(2111300) })
        );
        assert_eq!("city".parse::<UiEvent>(), Ok(UiEvent::CitySelected { city_id: None }));
        assert_eq!(
            "uncheck renda".parse::<UiEvent>(),
            Ok(UiEvent::IndicatorToggled { key: "renda".into(), checked: false })
        );
        assert_eq!("  CLEAR ".parse::<UiEvent>(), Ok(UiEvent::ClearFilters));
    }

    #[test]
    fn test_json_events() {
        let event: UiEvent = r#"{"type": "indicator_toggled", "key": "idade", "checked": true}"#
            .parse()
            .unwrap();
        assert_eq!(event, UiEvent::IndicatorToggled { key: "idade".into(), checked: true });

        let event: UiEvent = r#"{"type": "city_selected", "city_id": null}"#.parse().unwrap();
        assert_eq!(event, UiEvent::CitySelected { city_id: None });
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<UiEvent>(), Err(EventParseError::Empty));
        assert_eq!(
            "city abc".parse::<UiEvent>(),
            Err(EventParseError::InvalidCityId("abc".into()))
        );
        assert_eq!(
            "check".parse::<UiEvent>(),
            Err(EventParseError::MissingArgument("check"))
        );
        assert!(matches!("zoom 2".parse::<UiEvent>(), Err(EventParseError::UnknownCommand(_))));
        assert!(matches!("{bad".parse::<UiEvent>(), Err(EventParseError::Json(_))));
    }
}
