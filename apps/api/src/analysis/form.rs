//! Questionnaire payload and its normalization to display strings.
//!
//! Nothing here validates. Every field is optional, may arrive as a string,
//! a list of strings, or any other JSON value, and always renders to text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm_client::prompts::MISSING_ANSWER;

/// A single questionnaire answer in whatever shape the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl FieldValue {
    /// Lists join with ", ", strings pass through, anything else uses its JSON text.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Other(v) => v.to_string(),
        }
    }

    /// Individual values, for matching against known keys.
    pub fn values(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
            FieldValue::Other(Value::Null) => vec![],
            FieldValue::Other(v) => vec![v.to_string()],
        }
    }
}

/// Raw questionnaire answers as submitted. Serializes back to the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_activity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_job: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_style: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<FieldValue>,
    // Earlier questionnaire revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_preference: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dream_job: Option<FieldValue>,
    /// Fields this service does not know about, kept so the payload round-trips.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Every answer rendered to the string that goes into the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForm {
    pub age: String,
    pub education: String,
    pub location: String,
    pub flow_activity: String,
    pub strengths: String,
    pub situation: String,
    pub anti_job: String,
    pub interests: String,
    pub work_style: String,
    pub work_type: String,
    pub energy: String,
    pub priority: String,
    pub risk: String,
    pub routine: String,
    pub path_preference: Option<String>,
    pub dream_job: Option<String>,
}

fn display_or_missing(field: &Option<FieldValue>) -> String {
    match field {
        Some(FieldValue::Other(Value::Null)) | None => MISSING_ANSWER.to_string(),
        Some(value) => value.display(),
    }
}

fn display_optional(field: &Option<FieldValue>) -> Option<String> {
    match field {
        Some(FieldValue::Other(Value::Null)) | None => None,
        Some(value) => Some(value.display()).filter(|s| !s.trim().is_empty()),
    }
}

impl FormData {
    pub fn normalize(&self) -> NormalizedForm {
        NormalizedForm {
            age: display_or_missing(&self.age),
            education: display_or_missing(&self.education),
            location: display_or_missing(&self.location),
            flow_activity: display_or_missing(&self.flow_activity),
            strengths: display_or_missing(&self.strengths),
            situation: display_or_missing(&self.situation),
            anti_job: display_or_missing(&self.anti_job),
            interests: display_or_missing(&self.interests),
            work_style: display_or_missing(&self.work_style),
            work_type: display_or_missing(&self.work_type),
            energy: display_or_missing(&self.energy),
            priority: display_or_missing(&self.priority),
            risk: display_or_missing(&self.risk),
            routine: display_or_missing(&self.routine),
            path_preference: display_optional(&self.path_preference),
            dream_job: display_optional(&self.dream_job),
        }
    }

    /// Lower-cased, trimmed `education` answer, if any.
    pub fn education_key(&self) -> Option<String> {
        self.education
            .as_ref()
            .and_then(|v| v.values().into_iter().next())
            .map(|s| s.trim().to_lowercase())
    }

    /// Lower-cased, trimmed `situation` answers.
    pub fn situation_keys(&self) -> Vec<String> {
        self.situation
            .as_ref()
            .map(|v| v.values())
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_fields_join_with_comma_space() {
        let form: FormData = serde_json::from_value(json!({
            "interests": ["Technik", "IT", "Musik"],
            "energy": ["Menschen"],
        }))
        .unwrap();
        let normalized = form.normalize();
        assert_eq!(normalized.interests, "Technik, IT, Musik");
        assert_eq!(normalized.energy, "Menschen");
    }

    #[test]
    fn test_string_fields_are_identity() {
        let form: FormData = serde_json::from_value(json!({
            "interests": "Technik, IT",
            "strengths": "Logisches Denken",
        }))
        .unwrap();
        let normalized = form.normalize();
        assert_eq!(normalized.interests, "Technik, IT");
        assert_eq!(normalized.strengths, "Logisches Denken");
    }

    #[test]
    fn test_missing_and_null_fields_render_placeholder() {
        let form: FormData = serde_json::from_value(json!({ "risk": null })).unwrap();
        let normalized = form.normalize();
        assert_eq!(normalized.risk, MISSING_ANSWER);
        assert_eq!(normalized.age, MISSING_ANSWER);
        assert!(normalized.dream_job.is_none());
    }

    #[test]
    fn test_numeric_age_is_tolerated() {
        let form: FormData = serde_json::from_value(json!({ "age": 17 })).unwrap();
        assert_eq!(form.normalize().age, "17");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "age": "17",
            "interests": ["Technik", "IT"],
            "newsletter": true,
        });
        let form: FormData = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(form.extra.get("newsletter"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&form).unwrap(), raw);
    }

    #[test]
    fn test_education_and_situation_keys_are_lowercased() {
        let form: FormData = serde_json::from_value(json!({
            "education": " Fachabitur ",
            "situation": ["Student", "Nebenjob"],
        }))
        .unwrap();
        assert_eq!(form.education_key().as_deref(), Some("fachabitur"));
        assert_eq!(form.situation_keys(), vec!["student", "nebenjob"]);
    }
}
