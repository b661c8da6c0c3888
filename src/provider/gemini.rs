use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::errors::GenerationError;
use crate::wire::GenerationRequest;

/// Google Gemini `generateContent` adapter. The whole composed prompt goes
/// out as a single user turn.
pub struct GeminiProvider {
    api_key: String,
    api_base: String,
    client: Client,
    timeout_secs: Option<u64>,
    debug: bool,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_base: String, timeout_secs: Option<u64>, debug: bool) -> Self {
        Self {
            api_key,
            api_base,
            client: Client::new(),
            timeout_secs,
            debug,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn build_body(req: &GenerationRequest) -> GenerateBody<'_> {
    GenerateBody {
        contents: vec![Content {
            role: "user",
            parts: vec![PartIn { text: &req.prompt }],
        }],
        generation_config: req.response_schema.as_ref().map(|schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        }),
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        GenerationError::SchemaMismatch(format!("failed to parse Gemini response: {e}"))
    })?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Transport(format!("prompt blocked by provider: {reason}")));
    }

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::SchemaMismatch("Gemini returned no candidate text".into()));
    }
    Ok(text)
}

#[async_trait]
impl super::Provider for GeminiProvider {
    async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let url = self.endpoint(&req.model);
        let body = build_body(req);

        if self.debug {
            eprintln!(
                "debug[gemini]: HTTP POST {}\n{}",
                url,
                serde_json::to_string_pretty(&body).unwrap_or_default()
            );
        }
        tracing::debug!(
            model = %req.model,
            structured = req.response_schema.is_some(),
            "sending generateContent"
        );

        let mut call = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body);
        if let Some(secs) = self.timeout_secs {
            call = call.timeout(Duration::from_secs(secs));
        }

        let resp = call.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if self.debug {
            eprintln!("debug[gemini]: raw status: {}", status);
            eprintln!("debug[gemini]: raw response:\n{}", &text);
        }

        if !status.is_success() {
            tracing::warn!(%status, "Gemini API returned an error status");
            return Err(GenerationError::Transport(format!(
                "Gemini API error ({}): {}",
                status, text
            )));
        }

        extract_text(&text)
    }
}
