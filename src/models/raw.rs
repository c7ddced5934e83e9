// file: src/models/raw.rs
// description: loosely-typed raw incident record with tolerant field accessors
// reference: untrusted input boundary handling

use serde_json::Value;

/// View over a raw incident record as it arrives from the data source.
///
/// Any field may be absent, null, an empty string, or carry a different JSON
/// type than expected. Accessors degrade to `None` instead of erroring so a
/// malformed field never aborts the record.
#[derive(Debug, Clone, Copy)]
pub struct RawIncident<'a> {
    value: &'a Value,
}

impl<'a> RawIncident<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn is_record(&self) -> bool {
        self.value.is_object()
    }

    /// Field value, if the record is an object and the field is non-null.
    pub fn field(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key).filter(|v| !v.is_null())
    }

    /// Field rendered as text. Empty strings count as absent; scalars other
    /// than strings (numbers, booleans) are stringified rather than dropped,
    /// so `0` and `false` survive normalization.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// First present text value among aliased field names.
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Field coerced to an integer: JSON numbers directly, numeric strings
    /// by parsing. Anything else is absent.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.field(key)? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_skips_null_and_empty() {
        let record = json!({"location": "", "region": null, "job": "Turnaround"});
        let raw = RawIncident::new(&record);

        assert_eq!(raw.text("location"), None);
        assert_eq!(raw.text("region"), None);
        assert_eq!(raw.text("job"), Some("Turnaround".to_string()));
        assert_eq!(raw.text("missing"), None);
    }

    #[test]
    fn test_text_preserves_falsy_scalars() {
        let record = json!({"count": 0, "flag": false});
        let raw = RawIncident::new(&record);

        assert_eq!(raw.text("count"), Some("0".to_string()));
        assert_eq!(raw.text("flag"), Some("false".to_string()));
    }

    #[test]
    fn test_text_any_respects_alias_order() {
        let record = json!({"incident_number": "N-7", "id": "A-1"});
        let raw = RawIncident::new(&record);

        assert_eq!(
            raw.text_any(&["id", "incident_number"]),
            Some("A-1".to_string())
        );

        let record = json!({"incident_number": "N-7"});
        let raw = RawIncident::new(&record);
        assert_eq!(
            raw.text_any(&["id", "incident_number"]),
            Some("N-7".to_string())
        );
    }

    #[test]
    fn test_integer_coercion() {
        let record = json!({"year": 2023, "month": "4", "bad": "soon"});
        let raw = RawIncident::new(&record);

        assert_eq!(raw.integer("year"), Some(2023));
        assert_eq!(raw.integer("month"), Some(4));
        assert_eq!(raw.integer("bad"), None);
    }

    #[test]
    fn test_non_object_records() {
        let record = json!("just a string");
        let raw = RawIncident::new(&record);

        assert!(!raw.is_record());
        assert_eq!(raw.text("anything"), None);
        assert_eq!(raw.integer("anything"), None);
    }
}
