use std::fmt;
use std::str::FromStr;

use crate::error::InsightError;
use crate::model::{capitalize_first, Record};

/// The fixed diet selector offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietFilter {
    #[default]
    All,
    Vegan,
    Keto,
    Paleo,
    Mediterranean,
    Dash,
}

impl DietFilter {
    pub const ALL: [DietFilter; 6] = [
        DietFilter::All,
        DietFilter::Vegan,
        DietFilter::Keto,
        DietFilter::Paleo,
        DietFilter::Mediterranean,
        DietFilter::Dash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietFilter::All => "all",
            DietFilter::Vegan => "vegan",
            DietFilter::Keto => "keto",
            DietFilter::Paleo => "paleo",
            DietFilter::Mediterranean => "mediterranean",
            DietFilter::Dash => "dash",
        }
    }
}

impl fmt::Display for DietFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", capitalize_first(self.as_str()))
    }
}

impl FromStr for DietFilter {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DietFilter::ALL
            .iter()
            .find(|diet| diet.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| InsightError::UnknownDiet(s.to_string()))
    }
}

/// True when the record passes both the diet predicate and the free-text
/// predicate. `query` must already be lowercased.
fn matches(record: &Record, diet: DietFilter, query: &str) -> bool {
    let diet_ok = match diet {
        DietFilter::All => true,
        _ => record.diet_for_filter().eq_ignore_ascii_case(diet.as_str()),
    };
    diet_ok && record.search_text().contains(query)
}

/// Stable-order subsequence of `dataset` matching the current filter
/// state. An empty query matches every record.
pub fn filter_dataset<'a>(
    dataset: &'a [Record],
    diet: DietFilter,
    query: &str,
) -> Vec<&'a Record> {
    let query = query.to_lowercase();
    dataset
        .iter()
        .filter(|record| matches(record, diet, &query))
        .collect()
}

/// Index form of [`filter_dataset`], used by the state container so that
/// selections can reference positions in the filtered view.
pub(crate) fn filter_indices(dataset: &[Record], diet: DietFilter, query: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, diet, &query))
        .map(|(index, _)| index)
        .collect()
}
