//! Generative text endpoint client for the storefront chat widget.
//!
//! A single request/response call: the conversation history plus the new
//! message go up, assistant text comes back. No streaming, no tool use.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::ChatConfig;

/// Errors that can occur when calling the generative text endpoint.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Client construction failed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Client for the generative text endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| ChatError::Config(format!("invalid API key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Send the conversation history plus a new user message and return the
    /// assistant's reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint responds with a
    /// non-success status.
    #[instrument(skip(self, history, message), fields(history_len = history.len()))]
    pub async fn complete(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ChatError> {
        let mut messages = history.to_vec();
        messages.push(ChatMessage {
            role: ChatRole::User,
            content: message.to_owned(),
        });

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion.content)
    }
}
