//! Dashboard view-model
//!
//! Typed stand-in for the page controls, bound once from the catalog.

use serde::Serialize;

use super::cities::SelectOption;
use crate::fetcher::City;
use crate::indicators::catalog;

/// An indicator checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// State of every control on the page
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// Selected state (UF)
    pub state: String,
    pub city_options: Vec<SelectOption>,
    pub selected_city: Option<City>,
    pub checkboxes: Vec<Checkbox>,
    pub legend_visible: bool,
    /// Loading overlay
    pub loading: bool,
    /// Blocking alert message
    pub alert: Option<String>,
}

impl ViewModel {
    /// Bind one checkbox per catalog entry, all unchecked
    pub fn bind(state: &str) -> Self {
        Self {
            state: state.to_uppercase(),
            city_options: Vec::new(),
            selected_city: None,
            checkboxes: catalog()
                .iter()
                .map(|c| Checkbox {
                    key: c.key,
                    label: c.display_name,
                    checked: false,
                })
                .collect(),
            legend_visible: false,
            loading: false,
            alert: None,
        }
    }

    /// Check `key` and uncheck every other box. Returns false for an
    /// unknown key, leaving the boxes untouched.
    pub fn check_exclusive(&mut self, key: &str) -> bool {
        if !self.checkboxes.iter().any(|c| c.key == key) {
            return false;
        }
        for checkbox in &mut self.checkboxes {
            checkbox.checked = checkbox.key == key;
        }
        true
    }

    pub fn uncheck(&mut self, key: &str) {
        if let Some(checkbox) = self.checkboxes.iter_mut().find(|c| c.key == key) {
            checkbox.checked = false;
        }
    }

    pub fn uncheck_all(&mut self) {
        self.checkboxes.iter_mut().for_each(|c| c.checked = false);
    }

    /// Key of the checked indicator
    pub fn active_indicator(&self) -> Option<&'static str> {
        self.checkboxes.iter().find(|c| c.checked).map(|c| c.key)
    }

    pub fn checked_count(&self) -> usize {
        self.checkboxes.iter().filter(|c| c.checked).count()
    }

    /// Find a loaded city option by IBGE id
    pub fn city_option(&self, id: u32) -> Option<City> {
        self.city_options
            .iter()
            .filter_map(SelectOption::city)
            .find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_from_catalog() {
        let view = ViewModel::bind("ma");
        assert_eq!(view.state, "MA");
        assert_eq!(view.checkboxes.len(), catalog().len());
        assert_eq!(view.checked_count(), 0);
        assert!(!view.legend_visible);
    }

    #[test]
    fn test_exclusive_checking() {
        let mut view = ViewModel::bind("MA");
        assert!(view.check_exclusive("renda"));
        assert!(view.check_exclusive("idade"));
        assert_eq!(view.checked_count(), 1);
        assert_eq!(view.active_indicator(), Some("idade"));

        assert!(!view.check_exclusive("pib"));
        assert_eq!(view.active_indicator(), Some("idade"));

        view.uncheck("idade");
        assert_eq!(view.active_indicator(), None);
    }
}
