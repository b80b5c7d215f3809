//! Chat-completions client for the suggestions command.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint; the default
//! configuration points at Groq.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("AI API key is not configured (set ai.api_key or TASKMANAGER_AI__API_KEY)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("AI API response did not contain any message content")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    model: &'a str,
    temperature: f64,
    max_completion_tokens: u32,
    top_p: f64,
    stream: bool,
    stop: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AiClient {
    config: AiConfig,
    client: Client,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Send `prompt` as a single user message and return the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        if !self.config.is_configured() {
            return Err(ClientError::MissingApiKey);
        }

        let body = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            model: &self.config.model,
            temperature: self.config.temperature,
            max_completion_tokens: self.config.max_completion_tokens,
            top_p: self.config.top_p,
            stream: false,
            stop: None,
        };

        tracing::info!(
            url = %self.config.api_url,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Chat completion request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(ClientError::EmptyResponse)?;

        tracing::info!(response_len = content.len(), "Received chat completion");
        Ok(content)
    }
}
