//! Sample-based kind refinement.
//!
//! Inspects a bounded sample of raw cell values. Inference order is fixed:
//! datetime, then boolean, then number; the first that holds wins.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use fieldmap_model::{DataKind, RuleSet, contains_keyword};

/// Year first: `2024-03-15`, `2024/3/5 10:00`.
static YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})").expect("Invalid year-first date regex")
});
/// Year last: `15/03/2024` or `03/15/2024`.
static DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})").expect("Invalid year-last date regex")
});
/// Compact digit run: `20240315`.
static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("Invalid compact date regex"));

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;
const MISSING_MARKERS: [&str; 5] = ["nan", "null", "none", "na", "n/a"];

/// Bounds for the sample refiner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOptions {
    /// Maximum number of non-missing samples inspected.
    pub sample_size: usize,
    /// Leading samples probed for numeric parsing.
    pub numeric_probe: usize,
    /// Share of probed samples that must parse as numbers.
    pub numeric_ratio: f64,
    /// Maximum distinct values for a boolean column.
    pub boolean_max_distinct: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            sample_size: 100,
            numeric_probe: 20,
            numeric_ratio: 0.8,
            boolean_max_distinct: 3,
        }
    }
}

/// Kind after refinement plus notes on what the samples showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub kind: DataKind,
    pub notes: Vec<String>,
}

pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

fn valid_date(year: &str, month: &str, day: &str) -> bool {
    let (Ok(year), Ok(month), Ok(day)) = (year.parse(), month.parse(), day.parse()) else {
        return false;
    };
    (MIN_YEAR..=MAX_YEAR).contains(&year) && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// True when the value contains a plausible calendar date.
pub fn looks_like_date(value: &str) -> bool {
    let value = value.trim();
    if let Some(caps) = YMD.captures(value)
        && valid_date(&caps[1], &caps[2], &caps[3])
    {
        return true;
    }
    if let Some(caps) = DMY.captures(value)
        && (valid_date(&caps[3], &caps[2], &caps[1]) || valid_date(&caps[3], &caps[1], &caps[2]))
    {
        return true;
    }
    COMPACT
        .captures(value)
        .is_some_and(|caps| valid_date(&caps[1], &caps[2], &caps[3]))
}

/// Parses a number after stripping ASCII and full-width thousands separators.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();
    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Infers a kind from samples alone. `None` when the samples say nothing
/// beyond "string".
pub fn infer_kind(samples: &[&str], rules: &RuleSet, options: &ClassifierOptions) -> Option<DataKind> {
    if samples.is_empty() {
        return None;
    }
    if samples.iter().any(|value| looks_like_date(value)) {
        return Some(DataKind::Datetime);
    }

    let distinct: BTreeSet<String> = samples
        .iter()
        .map(|value| value.trim().to_lowercase())
        .collect();
    if distinct.len() <= options.boolean_max_distinct
        && distinct.iter().all(|value| rules.is_boolean_token(value))
    {
        return Some(DataKind::Boolean);
    }

    let probe = &samples[..samples.len().min(options.numeric_probe)];
    if !probe.is_empty() {
        let numeric = probe
            .iter()
            .filter(|value| parse_number(value).is_some())
            .count();
        if numeric as f64 / probe.len() as f64 >= options.numeric_ratio {
            return Some(DataKind::Number);
        }
    }
    None
}

/// Refines a name-derived kind with sample evidence.
///
/// Datetime and boolean evidence overrides the name-derived kind (unless it
/// is already boolean). Numeric evidence only upgrades a plain string, and
/// only when the name carries a quantity keyword, so numeric-looking
/// identifiers such as policy numbers stay strings.
pub fn refine(
    name: &str,
    kind: DataKind,
    samples: &[String],
    rules: &RuleSet,
    options: &ClassifierOptions,
) -> Refinement {
    let mut notes = Vec::new();
    if samples.is_empty() {
        return Refinement { kind, notes };
    }

    let present: Vec<&str> = samples
        .iter()
        .map(String::as_str)
        .filter(|value| !is_missing(value))
        .take(options.sample_size)
        .collect();
    let missing = samples.iter().filter(|value| is_missing(value)).count();
    if missing > 0 {
        notes.push(format!(
            "{missing} of {} sample values are missing",
            samples.len()
        ));
    }

    let mut refined = kind;
    if kind != DataKind::Boolean {
        match infer_kind(&present, rules, options) {
            Some(inferred @ (DataKind::Datetime | DataKind::Boolean)) if inferred != kind => {
                notes.push(format!("kind set to {inferred} from sample values"));
                refined = inferred;
            }
            Some(DataKind::Number) if kind == DataKind::String => {
                if contains_keyword(name, &rules.keywords.quantity) {
                    notes.push("kind set to number from sample values".to_string());
                    refined = DataKind::Number;
                } else {
                    notes.push(
                        "numeric samples ignored: name carries no quantity keyword".to_string(),
                    );
                }
            }
            _ => {}
        }
    }

    if refined == DataKind::Number
        && present
            .iter()
            .filter_map(|value| parse_number(value))
            .any(|number| number < 0.0)
    {
        notes.push("negative values present; may be reversals, refunds or endorsements".to_string());
    }

    Refinement {
        kind: refined,
        notes,
    }
}
