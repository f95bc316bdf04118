use crate::config::GenerationSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the text-generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Backend still failing after {retries} attempts")]
    Exhausted { retries: u32 },

    #[error("Backend returned no completion content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the chat-completions backend that performs match selection.
///
/// Requests a low-temperature, JSON-shaped completion. Retries with
/// exponential backoff on rate limits and server errors; other failures
/// surface immediately.
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_retries: u32,
}

impl GenerationClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        temperature: f64,
        max_retries: u32,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint,
            api_key,
            model,
            temperature,
            max_retries,
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
            settings.temperature,
            settings.max_retries,
            settings.timeout_secs,
        )
    }

    /// Submit a system + user prompt and return the raw completion text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request_body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                tracing::warn!(
                    "Generation attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GenerationError::RequestError(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Generation backend returned {}: {}", status, body);
                last_error = Some(GenerationError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|c| !c.trim().is_empty())
                .ok_or(GenerationError::EmptyContent)?;

            tracing::debug!("Generation call succeeded ({} chars)", content.len());

            return Ok(content);
        }

        Err(last_error.unwrap_or(GenerationError::Exhausted {
            retries: self.max_retries,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            temperature: 0.4,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![ChatMessage {
                role: "system",
                content: "match things",
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.4);
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn test_chat_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"ok\":true}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"ok\":true}")
        );
    }
}
