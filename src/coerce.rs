use crate::model::{FieldValue, Record};

/// Best-effort numeric coercion. This is the sole numeric ingestion point:
/// every aggregate and every nutrient value goes through here.
///
/// Text values are stripped of everything that is not a digit, a decimal
/// point, or a minus sign before parsing, so `"12.5g"` coerces to `12.5`.
/// Anything that fails to parse (including the empty string) is `None`.
pub fn coerce(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        FieldValue::Absent => None,
    }
}

/// Case-insensitive field lookup combined with coercion.
pub fn coerce_field(record: &Record, name: &str) -> Option<f64> {
    record.field(name).and_then(coerce)
}
