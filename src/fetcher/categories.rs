//! Age-group categories
//!
//! Display ordering and overlap removal for classified indicators. IBGE
//! publishes overlapping age ranges in the same table ("15 a 19 anos"
//! alongside "15 a 17 anos" and "18 a 19 anos"); only the widest range
//! of each overlapping family is kept.

use regex::Regex;
use std::sync::OnceLock;

use crate::indicators::IndicatorKind;

/// Display order for population age groups, keyed by IBGE category code
const AGE_GROUP_ORDER: &[(&str, &str)] = &[
    ("1140", "0 a 4 anos"),
    ("1141", "5 a 9 anos"),
    ("1142", "10 a 14 anos"),
    ("1143", "15 a 19 anos"),
    ("2792", "15 a 17 anos"),
    ("92982", "18 a 19 anos"),
    ("1144", "20 a 24 anos"),
    ("1145", "25 a 29 anos"),
    ("3299", "30 a 34 anos"),
    ("3300", "35 a 39 anos"),
    ("3301", "40 a 44 anos"),
    ("3520", "45 a 49 anos"),
    ("3244", "50 a 54 anos"),
    ("3245", "55 a 59 anos"),
    ("1149", "60 a 64 anos"),
    ("1150", "65 a 69 anos"),
    ("2503", "70 a 74 anos"),
    ("2504", "75 a 79 anos"),
    ("6653", "80 anos ou mais"),
];

/// Display order for schooling age groups
const SCHOOLING_GROUP_ORDER: &[(&str, &str)] = &[
    ("6557", "4 a 5 anos"),
    ("6558", "6 a 14 anos"),
    ("1143", "15 a 19 anos"),
    ("2792", "15 a 17 anos"),
    ("92982", "18 a 19 anos"),
    ("6559", "20 a 24 anos"),
    ("6560", "25 anos ou mais"),
];

/// Ordering table for a classified indicator
pub fn display_order(kind: IndicatorKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        IndicatorKind::AgeDistribution => AGE_GROUP_ORDER,
        IndicatorKind::SchoolingByAge => SCHOOLING_GROUP_ORDER,
        IndicatorKind::Scalar => &[],
    }
}

/// Inclusive age interval; open-ended ranges end at `u32::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub start: u32,
    pub end: u32,
}

struct AgePatterns {
    span: Regex,
    open: Regex,
    under: Regex,
    single: Regex,
}

fn patterns() -> Option<&'static AgePatterns> {
    static PATTERNS: OnceLock<Option<AgePatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(AgePatterns {
                span: Regex::new(r"(?i)^(?:de )?(\d+) a (\d+) anos?$").ok()?,
                open: Regex::new(r"(?i)^(\d+) anos? ou mais$").ok()?,
                under: Regex::new(r"(?i)^menos de (\d+) anos?$").ok()?,
                single: Regex::new(r"(?i)^(\d+) anos?$").ok()?,
            })
        })
        .as_ref()
}

impl AgeRange {
    /// Parse an IBGE age label such as "15 a 19 anos" or "80 anos ou mais"
    pub fn parse(label: &str) -> Option<Self> {
        let p = patterns()?;
        let label = label.trim();
        let num = |caps: &regex::Captures<'_>, i: usize| caps.get(i)?.as_str().parse::<u32>().ok();

        if let Some(caps) = p.span.captures(label) {
            let (start, end) = (num(&caps, 1)?, num(&caps, 2)?);
            return (start <= end).then_some(Self { start, end });
        }
        if let Some(caps) = p.open.captures(label) {
            return Some(Self {
                start: num(&caps, 1)?,
                end: u32::MAX,
            });
        }
        if let Some(caps) = p.under.captures(label) {
            let limit = num(&caps, 1)?;
            return Some(Self {
                start: 0,
                end: limit.saturating_sub(1),
            });
        }
        if let Some(caps) = p.single.captures(label) {
            let age = num(&caps, 1)?;
            return Some(Self { start: age, end: age });
        }
        None
    }

    /// Whether `other` lies within this range
    pub fn contains(&self, other: &AgeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A category value extracted from a classified response
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub code: String,
    pub label: String,
    pub value: f64,
}

/// Drop non-age categories and sub-ranges covered by a wider range, then
/// sort by the display-order table (unknown codes go last, by age)
pub fn arrange(kind: IndicatorKind, values: Vec<CategoryValue>) -> Vec<CategoryValue> {
    let ranged: Vec<(AgeRange, CategoryValue)> = values
        .into_iter()
        .filter_map(|v| AgeRange::parse(&v.label).map(|r| (r, v)))
        .collect();

    let mut kept: Vec<(AgeRange, CategoryValue)> = ranged
        .iter()
        .filter(|(range, _)| {
            !ranged
                .iter()
                .any(|(other, _)| other != range && other.contains(range))
        })
        .cloned()
        .collect();

    let mut seen = std::collections::HashSet::new();
    kept.retain(|(_, v)| seen.insert(v.code.clone()));

    let table = display_order(kind);
    kept.sort_by_key(|(range, v)| {
        let position = table
            .iter()
            .position(|(code, _)| *code == v.code)
            .unwrap_or(usize::MAX);
        (position, range.start)
    });

    kept.into_iter().map(|(_, v)| v).collect()
}

/// Canonical categories for simulated data (table entries with overlaps removed)
pub fn default_categories(kind: IndicatorKind) -> Vec<(&'static str, &'static str)> {
    let values = display_order(kind)
        .iter()
        .map(|(code, label)| CategoryValue {
            code: code.to_string(),
            label: label.to_string(),
            value: 0.0,
        })
        .collect();

    let kept = arrange(kind, values);
    display_order(kind)
        .iter()
        .filter(|(code, _)| kept.iter().any(|k| k.code == *code))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(code: &str, label: &str, value: f64) -> CategoryValue {
        CategoryValue {
            code: code.into(),
            label: label.into(),
            value,
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(AgeRange::parse("15 a 19 anos"), Some(AgeRange { start: 15, end: 19 }));
        assert_eq!(AgeRange::parse("De 4 a 5 anos"), Some(AgeRange { start: 4, end: 5 }));
        assert_eq!(
            AgeRange::parse("80 anos ou mais"),
            Some(AgeRange { start: 80, end: u32::MAX })
        );
        assert_eq!(AgeRange::parse("Menos de 1 ano"), Some(AgeRange { start: 0, end: 0 }));
        assert_eq!(AgeRange::parse("1 ano"), Some(AgeRange { start: 1, end: 1 }));
        assert_eq!(AgeRange::parse("Total"), None);
        assert_eq!(AgeRange::parse("19 a 15 anos"), None);
    }

    #[test]
    fn test_drops_subranges_when_parent_present() {
        let arranged = arrange(
            IndicatorKind::AgeDistribution,
            vec![
                cat("92982", "18 a 19 anos", 3.0),
                cat("1143", "15 a 19 anos", 5.0),
                cat("2792", "15 a 17 anos", 2.0),
                cat("95263", "Total", 100.0),
                cat("1140", "0 a 4 anos", 7.0),
            ],
        );
        let labels: Vec<_> = arranged.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["0 a 4 anos", "15 a 19 anos"]);
    }

    #[test]
    fn test_keeps_subranges_without_parent() {
        let arranged = arrange(
            IndicatorKind::AgeDistribution,
            vec![cat("92982", "18 a 19 anos", 3.0), cat("2792", "15 a 17 anos", 2.0)],
        );
        let labels: Vec<_> = arranged.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["15 a 17 anos", "18 a 19 anos"]);
    }

    #[test]
    fn test_unknown_codes_sorted_by_age_after_table() {
        let arranged = arrange(
            IndicatorKind::AgeDistribution,
            vec![
                cat("9", "90 a 94 anos", 1.0),
                cat("8", "85 a 89 anos", 1.0),
                cat("1141", "5 a 9 anos", 1.0),
            ],
        );
        let codes: Vec<_> = arranged.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["1141", "8", "9"]);
    }

    #[test]
    fn test_default_categories_have_no_overlaps() {
        let age = default_categories(IndicatorKind::AgeDistribution);
        assert_eq!(age.len(), AGE_GROUP_ORDER.len() - 2);
        assert!(!age.iter().any(|(_, label)| *label == "15 a 17 anos"));

        let schooling: Vec<_> = default_categories(IndicatorKind::SchoolingByAge)
            .into_iter()
            .map(|(_, l)| l)
            .collect();
        assert_eq!(
            schooling,
            vec!["4 a 5 anos", "6 a 14 anos", "15 a 19 anos", "20 a 24 anos", "25 anos ou mais"]
        );
        assert!(default_categories(IndicatorKind::Scalar).is_empty());
    }
}
