//! Typed HTTP client for an OpenAI-compatible chat completions API.

use crate::config::AiConfig;
use async_trait::async_trait;
use notepad_core::{GenerateError, TextGenerator};
use serde::{Deserialize, Serialize};

pub struct OpenAiTextGenerator {
    client: reqwest::Client,
    config: AiConfig,
}

// ── API types ───────────────────────────────────────

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Client impl ─────────────────────────────────────

impl OpenAiTextGenerator {
    pub fn new(config: AiConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerateError::Transport(format!("build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerateError::NotConfigured("AI_API_KEY"))?;

        let body = CompletionRequest {
            model: &self.config.model,
            messages: vec![CompletionMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Status { status, body });
        }

        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| GenerateError::Transport(format!("parse completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .find(|text| !text.trim().is_empty())
            .ok_or(GenerateError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let generator = OpenAiTextGenerator::new(config(None)).unwrap();
        let err = generator.generate_text("hi").await.unwrap_err();
        assert_eq!(err, GenerateError::NotConfigured("AI_API_KEY"));
    }

    #[test]
    fn completion_payload_shape() {
        let body = CompletionRequest {
            model: "m",
            messages: vec![CompletionMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");

        let generator = OpenAiTextGenerator::new(config(Some("k"))).unwrap();
        assert_eq!(generator.completions_url(), "http://127.0.0.1:9/chat/completions");
    }

    #[test]
    fn completion_response_ignores_unknown_fields() {
        let parsed: CompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi"));
    }
}
