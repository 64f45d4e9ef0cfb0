use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    errors::{GenerationErrorKind, OllamaError},
    options::GenerationOptions,
};

/// Request for the `/api/generate` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerationOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Response from the `/api/generate` endpoint with streaming disabled.
///
/// Only the fields this crate reads are modelled; counters the server omits
/// default to `None`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    /// The generated text.
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Number of tokens in the response.
    #[serde(default)]
    pub eval_count: Option<u32>,
    /// Time spent generating the response (nanoseconds).
    #[serde(default)]
    pub total_duration: Option<u64>,
}

/// Outcome of [`OllamaClient::generate`](crate::OllamaClient::generate).
///
/// `generation_time` and `model` are set iff `success`; `error` is set iff
/// not. On failure `response` holds a display-ready message.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub response: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GenerationErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl GenerationResult {
    pub fn succeeded(response: GenerateResponse, model: &str, elapsed: Duration) -> Self {
        Self {
            response: response.response,
            success: true,
            generation_time: Some(elapsed.as_secs_f64()),
            error: None,
            model: Some(model.to_string()),
            prompt_tokens: response.prompt_eval_count.unwrap_or(0),
            completion_tokens: response.eval_count.unwrap_or(0),
        }
    }

    pub fn failed(err: &OllamaError) -> Self {
        Self {
            response: err.user_message(),
            success: false,
            generation_time: None,
            error: Some(err.kind()),
            model: None,
            prompt_tokens: 0,
            completion_tokens: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn system_is_omitted_when_absent() {
        let req = GenerateRequest {
            model: "openhermes".into(),
            prompt: "hola".into(),
            stream: false,
            options: GenerationOptions::default().temperature(0.1),
            system: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "openhermes",
                "prompt": "hola",
                "stream": false,
                "options": { "temperature": 0.1 }
            })
        );
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        let result = GenerationResult::succeeded(resp, "openhermes", Duration::from_millis(1500));

        assert!(result.success);
        assert_eq!(result.response, "hi");
        assert_eq!(result.prompt_tokens, 0);
        assert_eq!(result.completion_tokens, 0);
        assert_eq!(result.generation_time, Some(1.5));
        assert_eq!(result.model.as_deref(), Some("openhermes"));
        assert!(result.error.is_none());
    }

    #[test]
    fn missing_response_defaults_to_empty() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"eval_count":2}"#).unwrap();
        assert_eq!(resp.response, "");
        assert_eq!(resp.eval_count, Some(2));
    }

    #[test]
    fn failure_carries_kind_and_no_timing() {
        let result = GenerationResult::failed(&OllamaError::Timeout { duration_secs: 120 });

        assert!(!result.success);
        assert_eq!(result.error, Some(GenerationErrorKind::Timeout));
        assert!(result.generation_time.is_none());
        assert!(result.model.is_none());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["error"], json!("timeout"));
        assert!(value.get("generation_time").is_none());
    }
}
