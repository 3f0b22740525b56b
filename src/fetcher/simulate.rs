//! Simulated data
//!
//! Plausible stand-in values used when the API yields nothing usable.
//! Each indicator (and category) has a fixed base value; a uniform jitter
//! is applied on top.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::categories::default_categories;
use super::types::DataPoint;
use crate::config::SimulationConfig;
use crate::indicators::{IndicatorConfig, IndicatorKind};

/// Generator for simulated data points
pub struct Simulator {
    rng: Mutex<StdRng>,
    jitter: f64,
}

impl Simulator {
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            jitter: config.jitter.abs().min(1.0),
        }
    }

    /// Base value for an indicator, per category index for classified ones
    pub fn base_value(config: &IndicatorConfig, category_index: usize) -> f64 {
        match config.kind {
            IndicatorKind::AgeDistribution => 52_000.0 * 0.86_f64.powi(category_index as i32),
            IndicatorKind::SchoolingByAge => {
                const RATES: [f64; 5] = [82.0, 97.0, 68.0, 28.0, 6.0];
                RATES.get(category_index).copied().unwrap_or(50.0)
            }
            IndicatorKind::Scalar => match config.key {
                "populacao" => 65_000.0,
                "renda" => 1_100.0,
                "saneamento" => 35.0,
                _ => 100.0,
            },
        }
    }

    fn jittered(&self, base: f64, unit: &str) -> f64 {
        let factor = match self.rng.lock() {
            Ok(mut rng) => 1.0 + rng.gen_range(-self.jitter..=self.jitter),
            Err(_) => 1.0,
        };
        let value = (base * factor).max(0.0);
        if unit == "%" {
            value.min(100.0)
        } else {
            value
        }
    }

    /// One simulated point per location; classified indicators produce one
    /// point per default category for the first location instead
    pub fn simulate(&self, config: &IndicatorConfig, locations: &[String]) -> Vec<DataPoint> {
        if config.kind.is_categorized() {
            let Some(location) = locations.first() else {
                return Vec::new();
            };
            return default_categories(config.kind)
                .into_iter()
                .enumerate()
                .map(|(i, (code, label))| {
                    let value = self.jittered(Self::base_value(config, i), config.unit);
                    DataPoint::new(location.clone(), value, config.unit)
                        .simulated()
                        .source(code)
                        .category(label)
                })
                .collect();
        }

        locations
            .iter()
            .map(|name| {
                let value = self.jittered(Self::base_value(config, 0), config.unit);
                DataPoint::new(name.clone(), value, config.unit).simulated()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::lookup;

    fn seeded(seed: u64, jitter: f64) -> Simulator {
        Simulator::new(&SimulationConfig {
            jitter,
            seed: Some(seed),
        })
    }

    #[test]
    fn test_values_within_jitter_band() {
        let sim = seeded(7, 0.15);
        let config = lookup("populacao").unwrap();
        let names: Vec<String> = (0..50).map(|i| format!("C{i}")).collect();
        let points = sim.simulate(config, &names);

        assert_eq!(points.len(), 50);
        for p in &points {
            assert!(p.is_simulated);
            assert!(p.value >= 65_000.0 * 0.85 - 1e-6 && p.value <= 65_000.0 * 1.15 + 1e-6);
            assert_eq!(p.unit, "habitantes");
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let config = lookup("renda").unwrap();
        let names = vec!["São Luís".to_string(), "Timon".to_string()];
        let a = seeded(42, 0.2).simulate(config, &names);
        let b = seeded(42, 0.2).simulate(config, &names);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_jitter_is_base_value() {
        let config = lookup("saneamento").unwrap();
        let points = seeded(1, 0.0).simulate(config, &["Caxias".to_string()]);
        assert_eq!(points[0].value, 35.0);
    }

    #[test]
    fn test_percentages_capped() {
        let config = lookup("escolaridade").unwrap();
        let points = seeded(3, 1.0).simulate(config, &["Codó".to_string()]);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.value <= 100.0 && p.value >= 0.0));
        assert!(points.iter().all(|p| p.category.is_some()));
    }

    #[test]
    fn test_categorized_without_location_is_empty() {
        let config = lookup("idade").unwrap();
        assert!(seeded(3, 0.1).simulate(config, &[]).is_empty());
    }
}
