//! Various response objects returned from the CRM service.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::iter::FromIterator;

/// One entry of the version-discovery listing (`GET /services/data`).
#[derive(Debug, Clone, Deserialize)]
pub struct VersionDescriptor {
    pub version: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `GET /services/data/v{version}/sobjects/{type}/describe`.
///
/// The service sends many more attributes per object; only the field list is kept.
#[derive(Debug, Deserialize)]
pub struct DescribeResponse {
    pub fields: Vec<FieldDescriptor>,
}

/// A single field of the described object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub label: String,

    #[serde(default)]
    pub custom: bool,
}

fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field names mapped to their labels, split into custom and standard ("default") fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    pub custom: BTreeMap<String, String>,
    pub default: BTreeMap<String, String>,
}

impl FieldSet {
    /// Record a field in the map matching its custom flag. Empty labels are kept as-is.
    pub fn insert(&mut self, field: FieldDescriptor) {
        let target = if field.custom {
            &mut self.custom
        } else {
            &mut self.default
        };

        target.insert(field.name, field.label);
    }

    /// Look up a label in either map.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.custom
            .get(name)
            .or_else(|| self.default.get(name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.custom.len() + self.default.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty() && self.default.is_empty()
    }
}

impl FromIterator<FieldDescriptor> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut fields = FieldSet::default();

        for field in iter {
            fields.insert(field);
        }

        fields
    }
}

/// Error entry the REST API sends back on failed requests. Bodies are a list of these.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,

    #[serde(rename = "errorCode")]
    pub error_code: String,
}

impl ApiErrorResponse {
    /// Summarize an error body for messages, falling back to the raw text.
    pub fn summarize(body: &str) -> String {
        match serde_json::from_str::<Vec<ApiErrorResponse>>(body) {
            Ok(errors) if !errors.is_empty() => errors
                .iter()
                .map(|error| format!("[{}] {}", error.error_code, error.message))
                .collect::<Vec<_>>()
                .join("; "),
            _ => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiErrorResponse, DescribeResponse, FieldSet};

    #[test]
    fn partitions_standard_and_custom_fields() {
        let body = r#"{
            "name": "Contact",
            "fields": [
                {"name": "Email", "label": "Email Address", "custom": false, "type": "email"},
                {"name": "X_Custom__c", "label": "Custom X", "custom": true, "length": 255}
            ]
        }"#;
        let description: DescribeResponse = serde_json::from_str(body).unwrap();
        let fields: FieldSet = description.fields.into_iter().collect();

        assert_eq!(fields.default.get("Email").map(String::as_str), Some("Email Address"));
        assert_eq!(fields.custom.get("X_Custom__c").map(String::as_str), Some("Custom X"));
        assert!(!fields.custom.contains_key("Email"));
        assert!(!fields.default.contains_key("X_Custom__c"));
    }

    #[test]
    fn empty_and_null_labels_are_kept() {
        let body = r#"{"fields": [
            {"name": "Blank__c", "label": "", "custom": true},
            {"name": "Nothing", "label": null, "custom": false}
        ]}"#;
        let description: DescribeResponse = serde_json::from_str(body).unwrap();
        let fields: FieldSet = description.fields.into_iter().collect();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.label("Blank__c"), Some(""));
        assert_eq!(fields.label("Nothing"), Some(""));
    }

    #[test]
    fn empty_description_gives_empty_set() {
        let description: DescribeResponse = serde_json::from_str(r#"{"fields": []}"#).unwrap();
        let fields: FieldSet = description.fields.into_iter().collect();

        assert!(fields.is_empty());
    }

    #[test]
    fn summarizes_api_errors() {
        let body = r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#;

        assert_eq!(
            ApiErrorResponse::summarize(body),
            "[INVALID_SESSION_ID] Session expired or invalid"
        );
        assert_eq!(ApiErrorResponse::summarize(" plain text "), "plain text");
    }
}
