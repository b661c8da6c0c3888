//! Sends composed instructions to a [`Provider`] and turns the answer into
//! typed records or trimmed text. One attempt per call; failures come back as
//! a [`GenerationError`] for the caller to report.

use serde_json::Value;

use crate::errors::GenerationError;
use crate::log::ExchangeLog;
use crate::provider::Provider;
use crate::wire::{GenerationRequest, StructuredRecord};

pub struct Dispatcher<'a> {
    provider: &'a dyn Provider,
    model: String,
    exchanges: Option<&'a ExchangeLog>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(provider: &'a dyn Provider, model: impl Into<String>) -> Self {
        Self { provider, model: model.into(), exchanges: None }
    }

    pub fn with_exchange_log(mut self, log: Option<&'a ExchangeLog>) -> Self {
        self.exchanges = log;
        self
    }

    async fn send(
        &self,
        stage: &str,
        prompt: String,
        schema: Option<Value>,
    ) -> Result<String, GenerationError> {
        let req = GenerationRequest { model: self.model.clone(), prompt, response_schema: schema };
        let outcome = self.provider.generate(&req).await;

        if let Some(log) = self.exchanges {
            match log.save(stage, &req, &outcome) {
                Ok(saved) => tracing::debug!(
                    request = %saved.request.display(),
                    response = %saved.response.display(),
                    "saved {stage} exchange"
                ),
                Err(e) => tracing::warn!("could not save {stage} exchange: {e:#}"),
            }
        }
        if let Err(e) = &outcome {
            tracing::warn!(stage, kind = e.kind(), "generation failed");
        }
        outcome
    }

    /// Ask for a JSON list of `T` constrained by `T::response_schema()`.
    pub async fn structured<T: StructuredRecord>(
        &self,
        stage: &str,
        instruction: String,
    ) -> Result<Vec<T>, GenerationError> {
        let text = self.send(stage, instruction, Some(T::response_schema())).await?;
        parse_records(&text)
    }

    /// Ask for free text; surrounding whitespace is trimmed.
    pub async fn text(&self, stage: &str, instruction: String) -> Result<String, GenerationError> {
        let text = self.send(stage, instruction, None).await?;
        Ok(text.trim().to_string())
    }
}

pub fn parse_records<T: StructuredRecord>(text: &str) -> Result<Vec<T>, GenerationError> {
    let strict_err = match serde_json::from_str::<Vec<T>>(text.trim()) {
        Ok(records) => return Ok(records),
        Err(e) => e,
    };

    if let Some(slice) = extract_first_json_array(text) {
        if let Ok(records) = serde_json::from_str::<Vec<T>>(slice) {
            tracing::debug!("parsed records from embedded JSON array");
            return Ok(records);
        }
    }

    Err(GenerationError::SchemaMismatch(format!(
        "model output did not match the requested shape: {strict_err}"
    )))
}

/// First balanced top-level `[...]` in `s`, skipping brackets inside strings.
fn extract_first_json_array(s: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if start.is_some() => in_string = true,
            b'[' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            b']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|st| &s[st..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
