use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::coerce::coerce;
use crate::model::{FieldValue, Record};

/// The fixed nutrient fields extracted for display, in output order.
pub const NUTRIENT_KEYS: [&str; 3] = ["Protein(g)", "Carbs(g)", "Fat(g)"];

/// Sentinel shown for nutrients that cannot be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// A nutrient display value.
///
/// A present-but-unparseable field keeps its raw text verbatim; only an
/// absent field becomes `NotAvailable`. That asymmetry is deliberate: the
/// user should see what the dataset actually holds.
#[derive(Debug, Clone, PartialEq)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    NotAvailable,
}

impl fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientValue::Number(n) => write!(f, "{}", n),
            NutrientValue::Text(s) => write!(f, "{}", s),
            NutrientValue::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl Serialize for NutrientValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NutrientValue::Number(n) => serializer.serialize_f64(*n),
            NutrientValue::Text(s) => serializer.serialize_str(s),
            NutrientValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Per-record extracted nutrient values, keyed by [`NUTRIENT_KEYS`] in
/// that fixed order regardless of the record's own field order.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientProfile {
    entries: Vec<(&'static str, NutrientValue)>,
}

impl NutrientProfile {
    pub fn extract(record: &Record) -> Self {
        let entries = NUTRIENT_KEYS
            .iter()
            .map(|&key| {
                let value = match record.field(key) {
                    Some(field) => match coerce(field) {
                        Some(n) => NutrientValue::Number(n),
                        None => match field {
                            FieldValue::Text(raw) => NutrientValue::Text(raw.clone()),
                            _ => NutrientValue::NotAvailable,
                        },
                    },
                    None => NutrientValue::NotAvailable,
                };
                (key, value)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&NutrientValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &NutrientValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}

impl Serialize for NutrientProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A record annotated for display: name, extracted nutrients, and the raw
/// source record. Produced by the sampler and the insight computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub name: String,
    pub nutrients: NutrientProfile,
    pub raw: Record,
}

impl RecipeCard {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.display_name(),
            nutrients: NutrientProfile::extract(record),
            raw: record.clone(),
        }
    }
}
