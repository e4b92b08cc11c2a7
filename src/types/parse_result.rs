// src/types/parse_result.rs
//! Parse result returned by the resume parsing service
//!
//! The payload is kept as raw JSON: every field is optional and the service
//! makes no promise about value shapes. Typed access is provided only for
//! `ats_score`, which drives the scored view.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

pub const NOT_FOUND: &str = "Not found";
pub const LIST_SEPARATOR: &str = ", ";

/// Labelled fields shown on the key-fields card, in display order
pub const KEY_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Email", "email"),
    ("Phone", "mobile_number"),
    ("Education", "education"),
    ("Experience", "experience"),
    ("Skills", "skills"),
    ("Certifications", "certifications"),
    ("Projects", "projects"),
];

/// Extra fields the service may return; shown only when present
pub const ADDITIONAL_FIELDS: &[(&str, &str)] = &[
    ("Total experience (years)", "total_experience"),
    ("Designation", "designation"),
    ("Companies", "company_names"),
    ("College", "college_name"),
    ("Degree", "degree"),
    ("Pages", "no_of_pages"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseResult(Value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub overall_score: Number,
    #[serde(default, deserialize_with = "lenient_details")]
    pub details: Vec<AtsDetail>,
}

/// One row of the score breakdown, already reduced to display text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtsDetail {
    pub category: String,
    pub score: String,
    pub comment: String,
}

/// Rows are taken as they come: nulls become empty cells and any other
/// value keeps its default string form. A non-list `details` means no rows.
fn lenient_details<'de, D>(deserializer: D) -> Result<Vec<AtsDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(rows)) => rows.iter().map(AtsDetail::from_row).collect(),
        _ => Vec::new(),
    })
}

impl ParseResult {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Raw field lookup; non-object payloads have no fields
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Display text for a field, `Not found` when absent or empty
    pub fn field_text(&self, key: &str) -> String {
        display_field(self.field(key))
    }

    /// Typed ATS score, `None` when absent or not shaped like a score
    pub fn ats_score(&self) -> Option<AtsScore> {
        let raw = self.field("ats_score")?;
        if raw.is_null() {
            return None;
        }

        match serde_json::from_value::<AtsScore>(raw.clone()) {
            Ok(score) => Some(score),
            Err(e) => {
                warn!("Ignoring malformed ats_score: {}", e);
                None
            }
        }
    }

    pub fn has_ats_score(&self) -> bool {
        self.ats_score().is_some()
    }

    /// Supplementary fields that carry a displayable value
    pub fn additional_fields(&self) -> Vec<(&'static str, String)> {
        ADDITIONAL_FIELDS
            .iter()
            .filter(|(_, key)| is_present(self.field(key)))
            .map(|(label, key)| (*label, self.field_text(key)))
            .collect()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl AtsScore {
    /// Overall score clamped to the 0-100 display range of the bar
    pub fn bar_percent(&self) -> f64 {
        self.overall_score.as_f64().unwrap_or(0.0).clamp(0.0, 100.0)
    }
}

impl AtsDetail {
    pub fn from_row(row: &Value) -> Self {
        let cell = |key: &str| row.get(key).map(cell_text).unwrap_or_default();
        Self {
            category: cell("category"),
            score: cell("score"),
            comment: cell("comment"),
        }
    }

    pub fn score_text(&self) -> &str {
        &self.score
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

/// Render a field value the way the result card shows it.
///
/// Lists are joined with `", "`, strings pass through unchanged and missing or
/// empty values become `Not found`. Any other value falls back to its default
/// string form.
pub fn display_field(value: Option<&Value>) -> String {
    if !is_present(value) {
        return NOT_FOUND.to_string();
    }

    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(list_item_text)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Some(other) => scalar_text(other),
        None => NOT_FOUND.to_string(),
    }
}

fn list_item_text(item: &Value) -> String {
    match item {
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: Value) -> ParseResult {
        ParseResult::from_value(value)
    }

    #[test]
    fn test_missing_fields_render_not_found() {
        let r = result(json!({"name": "Jane Doe"}));
        assert_eq!(r.field_text("name"), "Jane Doe");
        assert_eq!(r.field_text("email"), NOT_FOUND);
        assert_eq!(r.field_text("skills"), NOT_FOUND);
    }

    #[test]
    fn test_null_and_empty_values_render_not_found() {
        let r = result(json!({"email": null, "mobile_number": "", "projects": false}));
        assert_eq!(r.field_text("email"), NOT_FOUND);
        assert_eq!(r.field_text("mobile_number"), NOT_FOUND);
        assert_eq!(r.field_text("projects"), NOT_FOUND);
    }

    #[test]
    fn test_list_fields_join_with_comma_space() {
        let r = result(json!({
            "skills": ["SQL", "Python"],
            "education": ["BSc Computer Science"],
            "experience": [],
        }));
        assert_eq!(r.field_text("skills"), "SQL, Python");
        assert_eq!(r.field_text("education"), "BSc Computer Science");
        assert_eq!(r.field_text("experience"), "");
    }

    #[test]
    fn test_text_fields_pass_through_unchanged() {
        let r = result(json!({"experience": "  5 years, backend  "}));
        assert_eq!(r.field_text("experience"), "  5 years, backend  ");
    }

    #[test]
    fn test_other_scalars_use_default_string_form() {
        let r = result(json!({
            "no_of_pages": 2,
            "total_experience": 3.5,
            "projects": {"title": "Crawler"},
            "skills": ["Rust", 7, null],
        }));
        assert_eq!(r.field_text("no_of_pages"), "2");
        assert_eq!(r.field_text("total_experience"), "3.5");
        assert_eq!(r.field_text("projects"), r#"{"title":"Crawler"}"#);
        assert_eq!(r.field_text("skills"), "Rust, 7, ");
    }

    #[test]
    fn test_ats_score_parsed_in_service_order() {
        let r = result(json!({
            "ats_score": {
                "overall_score": 82,
                "details": [
                    {"category": "Formatting", "score": 8, "comment": "Clean layout"},
                    {"category": "Contact Info", "score": 5, "comment": "Missing phone"}
                ]
            }
        }));
        let score = r.ats_score().unwrap();
        assert_eq!(score.overall_score.to_string(), "82");
        assert_eq!(score.bar_percent(), 82.0);
        assert_eq!(score.details[0].category, "Formatting");
        assert_eq!(score.details[1].category, "Contact Info");
        assert_eq!(score.details[0].score_text(), "8");
    }

    #[test]
    fn test_absent_or_malformed_ats_score_is_unscored() {
        assert!(!result(json!({"name": "Jane Doe"})).has_ats_score());
        assert!(!result(json!({"ats_score": null})).has_ats_score());
        assert!(!result(json!({"ats_score": "high"})).has_ats_score());
        assert!(!result(json!([1, 2, 3])).has_ats_score());
    }

    #[test]
    fn test_null_row_fields_keep_result_scored() {
        let r = result(json!({
            "name": "Jane Doe",
            "ats_score": {
                "overall_score": 82,
                "details": [
                    {"category": "Formatting", "score": 8, "comment": null},
                    {"category": null, "score": null}
                ]
            }
        }));
        let score = r.ats_score().expect("scored");
        assert_eq!(score.details.len(), 2);
        assert_eq!(score.details[0].comment, "");
        assert_eq!(score.details[0].score_text(), "8");
        assert_eq!(score.details[1], AtsDetail::default());
    }

    #[test]
    fn test_non_numeric_row_score_renders_as_text() {
        let r = result(json!({
            "ats_score": {
                "overall_score": 82,
                "details": [
                    {"category": "Formatting", "score": "8", "comment": "Clean layout"},
                    {"category": "Projects", "score": 7.5, "comment": ["a", "b"]}
                ]
            }
        }));
        let score = r.ats_score().expect("scored");
        assert_eq!(score.details[0].score_text(), "8");
        assert_eq!(score.details[1].score_text(), "7.5");
        assert_eq!(score.details[1].comment, r#"["a","b"]"#);
    }

    #[test]
    fn test_null_or_non_list_details_mean_no_rows() {
        let null_rows = result(json!({"ats_score": {"overall_score": 40, "details": null}}));
        let text_rows = result(json!({"ats_score": {"overall_score": 40, "details": "none"}}));
        assert!(null_rows.ats_score().unwrap().details.is_empty());
        assert!(text_rows.ats_score().unwrap().details.is_empty());
    }

    #[test]
    fn test_bar_percent_is_clamped() {
        let high = result(json!({"ats_score": {"overall_score": 130}}));
        let low = result(json!({"ats_score": {"overall_score": -4}}));
        assert_eq!(high.ats_score().unwrap().bar_percent(), 100.0);
        assert_eq!(low.ats_score().unwrap().bar_percent(), 0.0);
        assert!(high.ats_score().unwrap().details.is_empty());
    }

    #[test]
    fn test_additional_fields_only_when_present() {
        let r = result(json!({"designation": "Engineer", "college_name": null, "no_of_pages": 1}));
        let extra = r.additional_fields();
        assert_eq!(
            extra,
            vec![
                ("Designation", "Engineer".to_string()),
                ("Pages", "1".to_string())
            ]
        );
    }
}
