// file: src/models/severity.rs
// description: severity code to label mapping and display ranking
// reference: incident severity taxonomy

use serde_json::Value;

/// Sentinel substituted for missing or empty data everywhere in the crate.
pub const UNKNOWN: &str = "Unknown";

/// Ordinal labels for severity codes 0 through 4.
pub const SEVERITY_LABELS: [&str; 5] = ["None", "Low", "Medium", "High", "Critical"];

/// Fixed rank table used to order severity facets. Labels outside this table
/// sort after all known labels.
pub const SEVERITY_RANK: [&str; 6] = ["None", "Low", "Medium", "High", "Critical", "Unknown"];

/// Maps a raw severity value to its display label.
///
/// Integer codes 0..=4 map to the ordinal labels. Any other numeric or
/// non-empty string value is rendered as-is; absent, null, and empty-string
/// values become the `Unknown` sentinel.
pub fn severity_label(raw: Option<&Value>) -> String {
    let Some(value) = raw else {
        return UNKNOWN.to_string();
    };

    match value {
        Value::Null => UNKNOWN.to_string(),
        Value::Number(code) => match code.as_i64() {
            Some(level @ 0..=4) => SEVERITY_LABELS[level as usize].to_string(),
            _ => code.to_string(),
        },
        Value::String(text) if text.is_empty() => UNKNOWN.to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Position of a label in the fixed rank table, if it is a known label.
pub fn severity_rank(label: &str) -> Option<usize> {
    SEVERITY_RANK.iter().position(|known| *known == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_codes_map_to_labels() {
        assert_eq!(severity_label(Some(&json!(0))), "None");
        assert_eq!(severity_label(Some(&json!(2))), "Medium");
        assert_eq!(severity_label(Some(&json!(4))), "Critical");
    }

    #[test]
    fn test_unknown_codes_are_stringified() {
        assert_eq!(severity_label(Some(&json!(99))), "99");
        assert_eq!(severity_label(Some(&json!(-1))), "-1");
        assert_eq!(severity_label(Some(&json!(2.5))), "2.5");
    }

    #[test]
    fn test_string_codes_pass_through() {
        assert_eq!(severity_label(Some(&json!("Severe"))), "Severe");
        assert_eq!(severity_label(Some(&json!("2"))), "2");
    }

    #[test]
    fn test_missing_values_become_unknown() {
        assert_eq!(severity_label(None), UNKNOWN);
        assert_eq!(severity_label(Some(&Value::Null)), UNKNOWN);
        assert_eq!(severity_label(Some(&json!(""))), UNKNOWN);
    }

    #[test]
    fn test_bool_is_stringified_not_replaced() {
        assert_eq!(severity_label(Some(&json!(false))), "false");
    }

    #[test]
    fn test_rank_table_lookup() {
        assert_eq!(severity_rank("None"), Some(0));
        assert_eq!(severity_rank("Critical"), Some(4));
        assert_eq!(severity_rank("Unknown"), Some(5));
        assert_eq!(severity_rank("ZZZ"), None);
    }
}
