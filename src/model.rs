use std::borrow::Cow;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Field name carrying the diet classification.
pub const DIET_FIELD: &str = "Diet_type";
/// Fallback label for records with no usable diet field.
pub const UNKNOWN_DIET: &str = "Unknown";
/// Fallback display name for records with no usable name field.
pub const UNNAMED: &str = "Unnamed";

const NAME_FIELDS: [&str; 2] = ["Recipe_name", "name"];

/// A single field value inside a [`Record`].
///
/// The dataset is loosely typed: JSON numbers and strings map directly,
/// `null` maps to `Absent`, and anything else is kept as its JSON text form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Absent,
}

impl FieldValue {
    /// Text form of the value, as used for search and display. `Absent`
    /// contributes an empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Absent => Cow::Borrowed(""),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Number(n) => match n.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => FieldValue::Absent,
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Absent => serializer.serialize_unit(),
        }
    }
}

/// One dataset entry: an open, ordered mapping from field name to value.
///
/// Field names are not consistently cased across the dataset, so every
/// lookup goes through the case-insensitive [`Record::field`] accessor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        Self { fields }
    }

    pub fn from_map(map: &serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(name, value)| (name.clone(), FieldValue::from(value)))
                .collect(),
        }
    }

    /// Case-insensitive field lookup. Returns the first field whose name
    /// matches, in the record's natural order.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Diet label for grouping: missing or empty diet field becomes
    /// the `"Unknown"` literal.
    pub fn diet_label(&self) -> String {
        match self.field(DIET_FIELD) {
            Some(value) => {
                let text = value.as_text();
                if text.is_empty() {
                    UNKNOWN_DIET.to_string()
                } else {
                    text.into_owned()
                }
            }
            None => UNKNOWN_DIET.to_string(),
        }
    }

    /// Diet value for filtering: missing diet field becomes the empty
    /// string, which matches no concrete diet selector.
    pub fn diet_for_filter(&self) -> Cow<'_, str> {
        match self.field(DIET_FIELD) {
            Some(value) => value.as_text(),
            None => Cow::Borrowed(""),
        }
    }

    /// First non-empty of the dedicated recipe name field and the generic
    /// `name` field, else `"Unnamed"`.
    pub fn display_name(&self) -> String {
        for key in NAME_FIELDS {
            if let Some(value) = self.field(key) {
                let text = value.as_text();
                if !text.is_empty() {
                    return text.into_owned();
                }
            }
        }
        UNNAMED.to_string()
    }

    /// Lowercased concatenation of every field value, space-joined in
    /// field order. This is the haystack for the free-text search.
    pub fn search_text(&self) -> String {
        self.fields
            .iter()
            .map(|(_, value)| value.as_text())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::deserialize(deserializer)?;
        Ok(Record::from_map(&map))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Uppercase the first character, as used for diet labels in presentation
/// output.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
