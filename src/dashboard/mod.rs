//! Dashboard
//!
//! Wires UI events to the city loader, data fetcher and chart renderer.
//!
//! ## Data Flow
//!
//! 1. A [`UiEvent`] arrives (selector change, checkbox, button)
//! 2. The view-model is updated (checkboxes stay mutually exclusive)
//! 3. The active indicator is fetched for the selected city, or ranked
//!    across the featured cities when no city is selected
//! 4. The renderer replaces the chart

mod cities;
mod events;
mod view;

pub use cities::{
    collation_key, compare_names, CityLoader, SelectOption, CITY_LOAD_ERROR, CITY_PLACEHOLDER,
};
pub use events::{EventParseError, UiEvent};
pub use view::{Checkbox, ViewModel};

use chrono::Utc;
use std::sync::Arc;

use crate::chart::{Canvas, ChartRenderer, ChartState, PLACEHOLDER_TEXT};
use crate::config::Config;
use crate::fetcher::DataFetcher;
use crate::ibge::StatsSource;
use crate::indicators::lookup;

/// The single-page dashboard
pub struct Dashboard<S: StatsSource> {
    fetcher: DataFetcher<S>,
    loader: CityLoader<S>,
    renderer: ChartRenderer,
    view: ViewModel,
}

impl<S: StatsSource> Dashboard<S> {
    /// Bind the view-model and load the city list for the initial state
    pub async fn init(source: Arc<S>, config: &Config) -> Self {
        let loader = CityLoader::new(source.clone(), &config.dashboard);
        let mut view = ViewModel::bind(&config.dashboard.state);

        if loader.supports(&view.state) {
            view.city_options = loader.load(&view.state).await;
        }

        Self {
            fetcher: DataFetcher::new(source, config),
            loader,
            renderer: ChartRenderer::new(config),
            view,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn canvas(&self) -> &Canvas {
        self.renderer.canvas()
    }

    pub fn chart(&self) -> Option<&ChartState> {
        self.renderer.current()
    }

    /// Apply one UI event
    pub async fn handle(&mut self, event: UiEvent) {
        tracing::debug!(?event, "Handling UI event");

        match event {
            UiEvent::StateSelected { state } => {
                self.view.state = state.to_uppercase();
                self.view.selected_city = None;
                self.view.city_options = self.loader.load(&self.view.state).await;
                if self.loader.supports(&self.view.state) {
                    self.refresh().await;
                } else if self.view.active_indicator().is_some() {
                    tracing::info!("No data for state {}", self.view.state);
                    self.reset_canvas();
                }
            }
            UiEvent::CitySelected { city_id } => {
                self.view.selected_city = match city_id {
                    Some(id) => {
                        let city = self.view.city_option(id);
                        if city.is_none() {
                            tracing::warn!("City {} is not in the selector", id);
                        }
                        city
                    }
                    None => None,
                };
                self.refresh().await;
            }
            UiEvent::IndicatorToggled { key, checked: true } => {
                if self.view.check_exclusive(&key) {
                    self.refresh().await;
                } else {
                    self.view.alert = Some(format!("Indicador desconhecido: {}", key));
                }
            }
            UiEvent::IndicatorToggled { key, checked: false } => {
                self.view.uncheck(&key);
                if self.view.active_indicator().is_none() {
                    self.reset_canvas();
                }
            }
            UiEvent::ClearFilters => {
                self.view.uncheck_all();
                self.view.alert = None;
                self.reset_canvas();
            }
            UiEvent::DismissNotice => self.renderer.dismiss_notice(),
            UiEvent::Tick => self.renderer.expire_notice(Utc::now()),
        }
    }

    fn reset_canvas(&mut self) {
        self.renderer.destroy();
        self.renderer.paint_placeholder(PLACEHOLDER_TEXT);
        self.view.legend_visible = false;
    }

    /// Fetch and render the active indicator, if any
    async fn refresh(&mut self) {
        let Some(key) = self.view.active_indicator() else {
            return;
        };

        self.view.loading = true;
        let points = match &self.view.selected_city {
            Some(city) => self.fetcher.fetch_indicator(key, Some(city)).await,
            None => self.fetcher.fetch_ranking(key).await,
        };
        self.view.loading = false;

        if points.is_empty() {
            let name = lookup(key).map(|c| c.display_name).unwrap_or(key);
            self.view.alert = Some(format!("Nenhum dado encontrado para {}", name));
            self.renderer.destroy();
            self.view.legend_visible = false;
            return;
        }

        self.view.alert = None;
        self.view.legend_visible = self.renderer.render(points, key).is_some();
    }
}
