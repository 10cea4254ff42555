use crate::config::AppConfig;
use crate::domain::model::OraclePayload;
use crate::domain::ports::Oracle;
use crate::utils::error::{ReadingError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// Gemini `generateContent` adapter: posts the instruction text plus inline
/// base64 image parts, returns the first candidate's text.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_body(payload: &OraclePayload) -> serde_json::Value {
        let mut parts = vec![json!({ "text": payload.instruction_text })];
        for photo in &payload.attachments {
            parts.push(json!({
                "inline_data": {
                    "mime_type": photo.mime_type,
                    "data": BASE64.encode(&photo.bytes),
                }
            }));
        }
        json!({ "contents": [{ "parts": parts }] })
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    async fn generate(&self, payload: &OraclePayload) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        tracing::debug!("Calling generative model: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReadingError::OracleFailure {
                message: format!("model endpoint returned {}: {}", status, truncate(&body, 200)),
            });
        }

        let value: serde_json::Value = response.json().await?;
        extract_text(&value).ok_or_else(|| ReadingError::OracleFailure {
            message: "model response contained no text".to_string(),
        })
    }
}

fn extract_text(value: &serde_json::Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HandPhoto;

    #[test]
    fn test_request_body_shape() {
        let payload = OraclePayload {
            instruction_text: "lee mis manos".to_string(),
            attachments: vec![HandPhoto::new(vec![0xFF, 0xD8], "image/jpeg")],
        };
        let body = GeminiClient::request_body(&payload);

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "lee mis manos");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], BASE64.encode([0xFF, 0xD8]));
    }

    #[test]
    fn test_extract_text() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hola " }, { "text": "mundo" }] }
            }]
        });
        assert_eq!(extract_text(&value).unwrap(), "Hola mundo");

        assert!(extract_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_text(&json!({})).is_none());
        assert!(extract_text(&json!({
            "candidates": [{ "content": { "parts": [] } }]
        }))
        .is_none());
    }
}
