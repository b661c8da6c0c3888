use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// ========================================
/// Provider-neutral request and structured records
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PromptLevel {
    #[default]
    #[serde(rename = "high-level")]
    HighLevel,
    #[serde(rename = "detailed")]
    Detailed,
}

impl PromptLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptLevel::HighLevel => "high-level",
            PromptLevel::Detailed => "detailed",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            PromptLevel::HighLevel => "High-Level (for brainstorming)",
            PromptLevel::Detailed => "Detailed (for specific results)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high-level" | "high level" | "high_level" | "high" | "highlevel" => {
                Some(PromptLevel::HighLevel)
            }
            "detailed" | "detail" => Some(PromptLevel::Detailed),
            _ => None,
        }
    }
}

impl fmt::Display for PromptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// A record type the provider can be asked to return as a JSON list.
pub trait StructuredRecord: DeserializeOwned + Send {
    /// Schema of a single item, in the provider's OpenAPI subset.
    fn item_schema() -> Value;

    fn response_schema() -> Value {
        json!({ "type": "ARRAY", "items": Self::item_schema() })
    }
}

fn string_field() -> Value {
    json!({ "type": "STRING" })
}

fn string_list_field() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptSuggestion {
    #[serde(rename = "prompt_title")]
    pub title: String,
    #[serde(rename = "suggested_prompt")]
    pub body: String,
    #[serde(default)]
    pub key_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_output: Option<String>,
    /// `None` when the model sent a level this crate does not recognize.
    #[serde(rename = "prompt_type", default, deserialize_with = "lenient_level")]
    pub kind: Option<PromptLevel>,
}

fn lenient_level<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PromptLevel>, D::Error> {
    let raw = Option::<Value>::deserialize(d)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(PromptLevel::parse))
}

impl StructuredRecord for PromptSuggestion {
    fn item_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "prompt_title": string_field(),
                "suggested_prompt": string_field(),
                "key_elements": string_list_field(),
                "example_output": { "type": "STRING", "nullable": true },
                "prompt_type": { "type": "STRING", "enum": ["high-level", "detailed"] },
            },
            "required": ["prompt_title", "suggested_prompt", "key_elements", "prompt_type"],
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UIDesignIdea {
    pub app_name: String,
    pub description: String,
    #[serde(default)]
    pub main_features: Vec<String>,
    pub target_audience: String,
    #[serde(default)]
    pub ui_components: Vec<String>,
}

impl StructuredRecord for UIDesignIdea {
    fn item_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "app_name": string_field(),
                "description": string_field(),
                "main_features": string_list_field(),
                "target_audience": string_field(),
                "ui_components": string_list_field(),
            },
            "required": [
                "app_name",
                "description",
                "main_features",
                "target_audience",
                "ui_components"
            ],
        })
    }
}

impl UIDesignIdea {
    /// Plain-text rendering used when an idea is exported.
    pub fn to_text(&self) -> String {
        let mut s = format!(
            "{}\n\nDescription: {}\nTarget Audience: {}\n\nMain Features:\n",
            self.app_name, self.description, self.target_audience
        );
        for f in &self.main_features {
            s.push_str(&format!("- {f}\n"));
        }
        s.push_str("\nUI Components:\n");
        for c in &self.ui_components {
            s.push_str(&format!("- {c}\n"));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_reads_provider_field_names() {
        let raw = r#"{
            "prompt_title": "Runner Hub",
            "suggested_prompt": "A vibrant app for marathon runners.",
            "key_elements": ["vibe", "audience"],
            "prompt_type": "high-level"
        }"#;
        let s: PromptSuggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(s.title, "Runner Hub");
        assert_eq!(s.body, "A vibrant app for marathon runners.");
        assert_eq!(s.kind, Some(PromptLevel::HighLevel));
        assert!(s.example_output.is_none());
    }

    #[test]
    fn prompt_type_is_read_leniently() {
        let raw = r#"[
            {"prompt_title":"a","suggested_prompt":"x","key_elements":[],"prompt_type":"High-Level"},
            {"prompt_title":"b","suggested_prompt":"y","key_elements":[],"prompt_type":"DETAILED"},
            {"prompt_title":"c","suggested_prompt":"z","key_elements":[],"prompt_type":"conceptual"},
            {"prompt_title":"d","suggested_prompt":"w","key_elements":[],"prompt_type":3},
            {"prompt_title":"e","suggested_prompt":"v","key_elements":[]}
        ]"#;
        let parsed: Vec<PromptSuggestion> = serde_json::from_str(raw).unwrap();
        let kinds: Vec<Option<PromptLevel>> = parsed.into_iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![Some(PromptLevel::HighLevel), Some(PromptLevel::Detailed), None, None, None]
        );
    }

    #[test]
    fn response_schema_wraps_item_in_array() {
        let schema = UIDesignIdea::response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["properties"]["main_features"]["type"], "ARRAY");
    }

    #[test]
    fn level_parse_accepts_wire_names() {
        assert_eq!(PromptLevel::parse("high-level"), Some(PromptLevel::HighLevel));
        assert_eq!(PromptLevel::parse(" Detailed "), Some(PromptLevel::Detailed));
        assert_eq!(PromptLevel::parse("refinement"), None);
    }
}
