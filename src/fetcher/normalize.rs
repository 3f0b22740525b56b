//! Response normalization
//!
//! Turns raw aggregate responses into [`DataPoint`]s. Every function
//! returns `None` when the response is structurally empty so the caller
//! can move on to the next fetch strategy.

use super::categories::{arrange, CategoryValue};
use super::types::{City, DataPoint};
use crate::ibge::{parse_value, AggregateResult, AggregateVariable, Series};
use crate::indicators::IndicatorConfig;

/// Results of the first variable block, if any
fn first_results(vars: &[AggregateVariable]) -> Option<&[AggregateResult]> {
    let results = &vars.first()?.results;
    (!results.is_empty()).then_some(results.as_slice())
}

/// First series carrying at least one value
fn first_series(result: &AggregateResult) -> Option<&Series> {
    result.series.iter().find(|s| !s.values.is_empty())
}

/// Normalize a single-location response
///
/// `name` overrides the location name from the response; it is used when a
/// state aggregate stands in for the selected city.
pub fn single(
    config: &IndicatorConfig,
    vars: &[AggregateVariable],
    name: Option<&str>,
    state_level: bool,
) -> Option<Vec<DataPoint>> {
    let results = first_results(vars)?;

    let finish = |point: DataPoint| if state_level { point.state_level() } else { point };

    if config.kind.is_categorized() {
        let (values, series) = categories(config, results)?;
        let location = name.unwrap_or_else(|| series.location.display_name()).to_string();
        let points: Vec<DataPoint> = values
            .into_iter()
            .map(|c| {
                finish(
                    DataPoint::new(location.clone(), c.value, config.unit)
                        .source(series.location.id.clone())
                        .category(c.label),
                )
            })
            .collect();
        return (!points.is_empty()).then_some(points);
    }

    let series = first_series(&results[0])?;
    let value = parse_value(series.raw_value(config.period));
    let location = name.unwrap_or_else(|| series.location.display_name());

    Some(vec![finish(
        DataPoint::new(location, value, config.unit).source(series.location.id.clone()),
    )])
}

/// Extract category values from a classified response, in display order
fn categories<'a>(
    config: &IndicatorConfig,
    results: &'a [AggregateResult],
) -> Option<(Vec<CategoryValue>, &'a Series)> {
    let mut values = Vec::new();
    let mut representative = None;

    for result in results {
        let Some(series) = first_series(result) else {
            continue;
        };
        let Some((code, label)) = result
            .classifications
            .first()
            .and_then(|c| c.categories.iter().next())
        else {
            continue;
        };

        representative.get_or_insert(series);
        values.push(CategoryValue {
            code: code.clone(),
            label: label.clone(),
            value: parse_value(series.raw_value(config.period)),
        });
    }

    let arranged = arrange(config.kind, values);
    if arranged.is_empty() {
        return None;
    }
    Some((arranged, representative?))
}

/// Normalize a multi-location municipal response, one point per city
pub fn ranking(
    config: &IndicatorConfig,
    vars: &[AggregateVariable],
    cities: &[City],
) -> Option<Vec<DataPoint>> {
    let results = first_results(vars)?;

    let points: Vec<DataPoint> = results[0]
        .series
        .iter()
        .filter(|s| !s.values.is_empty())
        .map(|series| {
            let name = cities
                .iter()
                .find(|c| c.id.to_string() == series.location.id)
                .map(|c| c.name.as_str())
                .unwrap_or_else(|| series.location.display_name());
            DataPoint::new(name, parse_value(series.raw_value(config.period)), config.unit)
                .source(series.location.id.clone())
        })
        .collect();

    (!points.is_empty()).then_some(points)
}
