//! Schema validation for decoded model output.
//!
//! Walks a `serde_json::Value` in a fixed order and stops at the first
//! violation. Nothing is defaulted or coerced: a score of `"90"` or `90.0` is
//! rejected just like `150`. On success the checked value is materialised
//! into a `ScoringResult` with the same contents.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::scoring::models::{Metrics, Rewrite, ScoringResult, SectionFeedback};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "overall_score",
    "metrics",
    "missing_keywords",
    "strengths",
    "top_fixes",
    "section_feedback",
    "notes",
];

const SECTION_FIELDS: [&str; 4] = ["section", "score", "feedback", "rewrites"];

/// The first schema rule a decoded value broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct SchemaViolation {
    /// Path of the offending field, e.g. `section_feedback[1].score`.
    pub field: String,
    pub message: String,
}

fn violation(field: impl Into<String>, message: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        field: field.into(),
        message: message.into(),
    }
}

pub fn validate_scoring_result(value: &Value) -> Result<ScoringResult, SchemaViolation> {
    let root = value
        .as_object()
        .ok_or_else(|| violation("$", "result must be a JSON object"))?;

    for field in REQUIRED_FIELDS {
        if !root.contains_key(field) {
            return Err(violation(field, "missing required field"));
        }
    }

    let overall_score = score("overall_score", &root["overall_score"])?;
    let metrics = metrics(&root["metrics"])?;
    let missing_keywords = string_list("missing_keywords", &root["missing_keywords"])?;
    let strengths = string_list("strengths", &root["strengths"])?;
    let top_fixes = string_list("top_fixes", &root["top_fixes"])?;
    let section_feedback = section_feedback(&root["section_feedback"])?;
    let notes = string("notes", &root["notes"])?;

    Ok(ScoringResult {
        overall_score,
        metrics,
        missing_keywords,
        strengths,
        top_fixes,
        section_feedback,
        notes,
    })
}

/// Integral and within 0..=100. Floats, strings, booleans and null all fail.
fn score(field: &str, value: &Value) -> Result<u8, SchemaViolation> {
    match value.as_u64() {
        Some(n) if n <= 100 => Ok(n as u8),
        _ => Err(violation(
            field,
            format!("must be an integer 0-100, got: {value}"),
        )),
    }
}

fn string(field: &str, value: &Value) -> Result<String, SchemaViolation> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| violation(field, format!("must be a string, got: {value}")))
}

fn array<'a>(field: &str, value: &'a Value) -> Result<&'a Vec<Value>, SchemaViolation> {
    value
        .as_array()
        .ok_or_else(|| violation(field, "must be an array"))
}

fn object<'a>(field: &str, value: &'a Value) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| violation(field, "must be an object"))
}

fn string_list(field: &str, value: &Value) -> Result<Vec<String>, SchemaViolation> {
    array(field, value)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| violation(field, "must be an array of strings"))
        })
        .collect()
}

fn metrics(value: &Value) -> Result<Metrics, SchemaViolation> {
    let map = object("metrics", value)?;
    let metric = |name: &str| -> Result<u8, SchemaViolation> {
        let path = format!("metrics.{name}");
        let value = map
            .get(name)
            .ok_or_else(|| violation(path.as_str(), "missing metric"))?;
        score(&path, value)
    };

    Ok(Metrics {
        clarity: metric("clarity")?,
        impact: metric("impact")?,
        professionalism: metric("professionalism")?,
        role_fit: metric("role_fit")?,
        ats: metric("ats")?,
    })
}

fn section_feedback(value: &Value) -> Result<Vec<SectionFeedback>, SchemaViolation> {
    array("section_feedback", value)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("section_feedback[{i}]");
            let map = object(&path, item)?;

            if let Some(missing) = SECTION_FIELDS.iter().find(|f| !map.contains_key(**f)) {
                return Err(violation(
                    format!("{path}.{missing}"),
                    "section_feedback items must have: section, score, feedback, rewrites",
                ));
            }

            Ok(SectionFeedback {
                section: string(&format!("{path}.section"), &map["section"])?,
                score: score(&format!("{path}.score"), &map["score"])?,
                feedback: string_list(&format!("{path}.feedback"), &map["feedback"])?,
                rewrites: rewrites(&path, &map["rewrites"])?,
            })
        })
        .collect()
}

fn rewrites(section_path: &str, value: &Value) -> Result<Vec<Rewrite>, SchemaViolation> {
    let path = format!("{section_path}.rewrites");
    array(&path, value)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            let map = item
                .as_object()
                .filter(|m| m.contains_key("original") && m.contains_key("improved"))
                .ok_or_else(|| {
                    violation(
                        item_path.as_str(),
                        "rewrites must have original and improved fields",
                    )
                })?;

            Ok(Rewrite {
                original: string(&format!("{item_path}.original"), &map["original"])?,
                improved: string(&format!("{item_path}.improved"), &map["improved"])?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "overall_score": 82,
            "metrics": {"clarity": 80, "impact": 85, "professionalism": 90, "role_fit": 75, "ats": 70},
            "missing_keywords": ["kubernetes"],
            "strengths": ["clear impact"],
            "top_fixes": ["add metrics"],
            "section_feedback": [{
                "section": "Experience",
                "score": 80,
                "feedback": ["good"],
                "rewrites": [{"original": "built services", "improved": "built 3 services handling 10k rps"}]
            }],
            "notes": "solid"
        })
    }

    fn field_of(value: Value) -> String {
        validate_scoring_result(&value).unwrap_err().field
    }

    #[test]
    fn test_valid_result_passes_through_unchanged() {
        let input = valid();
        let result = validate_scoring_result(&input).unwrap();
        assert_eq!(result.overall_score, 82);
        assert_eq!(result.metrics.role_fit, 75);
        assert_eq!(result.section_feedback[0].rewrites[0].original, "built services");
        assert_eq!(serde_json::to_value(&result).unwrap(), input);
    }

    #[test]
    fn test_boundary_scores_are_accepted() {
        let mut v = valid();
        v["overall_score"] = json!(0);
        v["metrics"]["ats"] = json!(100);
        assert!(validate_scoring_result(&v).is_ok());
    }

    #[test]
    fn test_empty_arrays_are_accepted() {
        let mut v = valid();
        v["missing_keywords"] = json!([]);
        v["section_feedback"] = json!([]);
        assert!(validate_scoring_result(&v).is_ok());
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert_eq!(field_of(json!([1, 2, 3])), "$");
    }

    #[test]
    fn test_missing_top_level_field_reported_in_order() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("notes");
        v.as_object_mut().unwrap().remove("strengths");
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "strengths");
        assert_eq!(err.message, "missing required field");
    }

    #[test]
    fn test_overall_score_out_of_range() {
        let mut v = valid();
        v["overall_score"] = json!(150);
        assert_eq!(field_of(v), "overall_score");
    }

    #[test]
    fn test_negative_overall_score() {
        let mut v = valid();
        v["overall_score"] = json!(-1);
        assert_eq!(field_of(v), "overall_score");
    }

    #[test]
    fn test_string_score_is_not_coerced() {
        let mut v = valid();
        v["overall_score"] = json!("90");
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "overall_score");
        assert!(err.message.contains("\"90\""));
    }

    #[test]
    fn test_float_score_is_rejected() {
        let mut v = valid();
        v["overall_score"] = json!(90.5);
        assert_eq!(field_of(v), "overall_score");
    }

    #[test]
    fn test_boolean_score_is_rejected() {
        let mut v = valid();
        v["metrics"]["clarity"] = json!(true);
        assert_eq!(field_of(v), "metrics.clarity");
    }

    #[test]
    fn test_missing_metric() {
        let mut v = valid();
        v["metrics"].as_object_mut().unwrap().remove("ats");
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "metrics.ats");
        assert_eq!(err.message, "missing metric");
    }

    #[test]
    fn test_metric_out_of_range() {
        let mut v = valid();
        v["metrics"]["impact"] = json!(101);
        assert_eq!(field_of(v), "metrics.impact");
    }

    #[test]
    fn test_metrics_must_be_object() {
        let mut v = valid();
        v["metrics"] = json!([80, 85]);
        assert_eq!(field_of(v), "metrics");
    }

    #[test]
    fn test_string_list_must_be_array() {
        let mut v = valid();
        v["top_fixes"] = json!("add metrics");
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "top_fixes");
        assert_eq!(err.message, "must be an array");
    }

    #[test]
    fn test_string_list_rejects_null() {
        let mut v = valid();
        v["missing_keywords"] = Value::Null;
        assert_eq!(field_of(v), "missing_keywords");
    }

    #[test]
    fn test_string_list_rejects_non_string_items() {
        let mut v = valid();
        v["strengths"] = json!(["ok", 3]);
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "strengths");
        assert_eq!(err.message, "must be an array of strings");
    }

    #[test]
    fn test_section_feedback_must_be_array() {
        let mut v = valid();
        v["section_feedback"] = json!({"section": "Experience"});
        assert_eq!(field_of(v), "section_feedback");
    }

    #[test]
    fn test_section_item_must_be_object() {
        let mut v = valid();
        v["section_feedback"] = json!(["Experience"]);
        assert_eq!(field_of(v), "section_feedback[0]");
    }

    #[test]
    fn test_section_item_missing_subfield() {
        let mut v = valid();
        v["section_feedback"][0].as_object_mut().unwrap().remove("feedback");
        assert_eq!(field_of(v), "section_feedback[0].feedback");
    }

    #[test]
    fn test_section_score_out_of_range_reports_index() {
        let mut v = valid();
        let second = v["section_feedback"][0].clone();
        v["section_feedback"].as_array_mut().unwrap().push(second);
        v["section_feedback"][1]["score"] = json!(300);
        assert_eq!(field_of(v), "section_feedback[1].score");
    }

    #[test]
    fn test_section_feedback_field_must_be_array() {
        let mut v = valid();
        v["section_feedback"][0]["feedback"] = json!("good");
        assert_eq!(field_of(v), "section_feedback[0].feedback");
    }

    #[test]
    fn test_rewrites_must_be_array() {
        let mut v = valid();
        v["section_feedback"][0]["rewrites"] = Value::Null;
        assert_eq!(field_of(v), "section_feedback[0].rewrites");
    }

    #[test]
    fn test_rewrite_missing_improved() {
        let mut v = valid();
        v["section_feedback"][0]["rewrites"] = json!([{"original": "built services"}]);
        let err = validate_scoring_result(&v).unwrap_err();
        assert_eq!(err.field, "section_feedback[0].rewrites[0]");
        assert!(err.message.contains("original and improved"));
    }

    #[test]
    fn test_rewrite_must_be_object() {
        let mut v = valid();
        v["section_feedback"][0]["rewrites"] = json!(["built services"]);
        assert_eq!(field_of(v), "section_feedback[0].rewrites[0]");
    }

    #[test]
    fn test_notes_must_be_string() {
        let mut v = valid();
        v["notes"] = json!(["solid"]);
        assert_eq!(field_of(v), "notes");
    }

    #[test]
    fn test_first_violation_wins() {
        let mut v = valid();
        v["overall_score"] = json!(500);
        v["notes"] = json!(1);
        assert_eq!(field_of(v), "overall_score");
    }

    #[test]
    fn test_violation_display_includes_field() {
        let err = violation("metrics.ats", "missing metric");
        assert_eq!(err.to_string(), "metrics.ats: missing metric");
    }
}
