//! Field comparison between claimed and self-reported values
//!
//! Claim fields resolve to one of three outcomes. "Nothing claimed" and
//! "claimed but withheld" are both `NotApplicable`; only a claim that was
//! selected and then failed (or was left blank) is a `Mismatch`.
//!
//! Name is the exception: every verification checks it, so it is plain
//! boolean.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome of comparing one claim field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Match,
    Mismatch,
    NotApplicable,
}

/// Claim fields a Request can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimField {
    Height,
    Age,
    Location,
}

impl ClaimField {
    pub const ALL: [ClaimField; 3] = [Self::Height, Self::Age, Self::Location];

    /// Key used in `extractedData` and `selectedFields`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Age => "age",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported data submitted by a target.
///
/// Kept as an open JSON object so unknown keys survive the round trip;
/// only the fields actually compared are read, via [`ExtractedData::field`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedData(Map<String, Value>);

impl ExtractedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for string values
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), Value::String(value.into()));
        self
    }

    /// Read a field as a string.
    ///
    /// Strings, numbers and booleans are read as text. Null, blank strings and
    /// nested structures count as not supplied.
    pub fn field(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text).filter(|s| !s.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Text form of a scalar JSON value
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Compare one claim field.
///
/// 1. no claim → `NotApplicable`
/// 2. claim, not selected → `NotApplicable`
/// 3. claim, selected, nothing extracted → `Mismatch`
/// 4. otherwise case-insensitive, trimmed equality
pub fn compare(extracted: Option<&str>, claimed: Option<&str>, selected: bool) -> MatchOutcome {
    let Some(claimed) = present(claimed) else {
        return MatchOutcome::NotApplicable;
    };
    if !selected {
        return MatchOutcome::NotApplicable;
    }
    let Some(extracted) = present(extracted) else {
        return MatchOutcome::Mismatch;
    };

    if normalize(extracted) == normalize(claimed) {
        MatchOutcome::Match
    } else {
        MatchOutcome::Mismatch
    }
}

/// Compare the display name against the claimed target name.
///
/// `false` when either side is missing.
pub fn compare_name(display_name: Option<&str>, claimed_name: Option<&str>) -> bool {
    match (present(display_name), present(claimed_name)) {
        (Some(display), Some(claimed)) => normalize(display) == normalize(claimed),
        _ => false,
    }
}

/// Whether `field` is among the target's selected fields
pub fn is_selected(selected_fields: &[String], field: ClaimField) -> bool {
    selected_fields.iter().any(|f| f == field.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_claim_is_not_applicable() {
        assert_eq!(compare(Some("180cm"), None, true), MatchOutcome::NotApplicable);
        assert_eq!(compare(None, None, false), MatchOutcome::NotApplicable);
        assert_eq!(compare(Some("x"), Some(""), true), MatchOutcome::NotApplicable);
    }

    #[test]
    fn test_withheld_is_not_applicable() {
        assert_eq!(
            compare(Some("180cm"), Some("180cm"), false),
            MatchOutcome::NotApplicable
        );
    }

    #[test]
    fn test_selected_but_missing_is_mismatch() {
        assert_eq!(compare(None, Some("180cm"), true), MatchOutcome::Mismatch);
        assert_eq!(compare(Some("  "), Some("180cm"), true), MatchOutcome::Mismatch);
    }

    #[test]
    fn test_normalized_equality() {
        assert_eq!(compare(Some("180CM"), Some("180cm"), true), MatchOutcome::Match);
        assert_eq!(
            compare(Some("  Lisbon "), Some("lisbon"), true),
            MatchOutcome::Match
        );
        assert_eq!(compare(Some("175cm"), Some("180cm"), true), MatchOutcome::Mismatch);
    }

    #[test]
    fn test_compare_name_is_binary() {
        assert!(compare_name(Some(" ALICE "), Some("alice")));
        assert!(!compare_name(Some("Alice"), Some("Bob")));
        assert!(!compare_name(None, Some("X")));
        assert!(!compare_name(Some("X"), None));
        assert!(!compare_name(None, None));
    }

    #[test]
    fn test_extracted_field_reads_scalars() {
        let data: ExtractedData = serde_json::from_value(json!({
            "height": "180CM",
            "age": 31,
            "verified": true,
            "location": null,
            "blank": "  ",
            "nested": {"a": 1}
        }))
        .unwrap();

        assert_eq!(data.field("height").as_deref(), Some("180CM"));
        assert_eq!(data.field("age").as_deref(), Some("31"));
        assert_eq!(data.field("verified").as_deref(), Some("true"));
        assert_eq!(data.field("location"), None);
        assert_eq!(data.field("blank"), None);
        assert_eq!(data.field("nested"), None);
        assert_eq!(data.field("missing"), None);
    }

    #[test]
    fn test_extracted_data_keeps_unknown_keys() {
        let raw = json!({"height": "180cm", "eyeColour": "green", "doc": {"n": 1}});
        let data: ExtractedData = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&data).unwrap(), raw);
    }

    #[test]
    fn test_is_selected() {
        let selected = vec!["height".to_string(), "location".to_string()];
        assert!(is_selected(&selected, ClaimField::Height));
        assert!(!is_selected(&selected, ClaimField::Age));
        assert!(is_selected(&selected, ClaimField::Location));
    }

    #[test]
    fn test_outcome_wire_names() {
        assert_eq!(
            serde_json::to_value(MatchOutcome::NotApplicable).unwrap(),
            json!("not_applicable")
        );
        assert_eq!(serde_json::to_value(MatchOutcome::Match).unwrap(), json!("match"));
    }
}
