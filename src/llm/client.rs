use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;

use super::TextGenerator;
use super::sse_parser::sse_to_text_stream;
use crate::config::ResolvedConfig;

/// Instruction sent with every prompt; the prompt itself carries the task.
const SYSTEM_PROMPT: &str = "You are an assistant that drafts professional business emails for office workers. \
     Follow every formatting instruction in the request exactly and output only what is asked for.";

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Replies are streamed and collected into a single string.
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    credential_required: bool,
}

impl ChatClient {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        let credential_required = api_key.is_some();
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            credential_required,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            credential_required: config.credential_required,
            ..Self::new(
                config.endpoint.clone(),
                config.model.clone(),
                config.api_key.clone(),
            )
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.completions_url();

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Borrowed(SYSTEM_PROMPT),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(prompt),
                },
            ],
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        tracing::debug!(%url, model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        let mut stream = std::pin::pin!(sse_to_text_stream(response.bytes_stream()));
        let mut reply = String::new();

        while let Some(chunk) = stream.next().await {
            reply.push_str(&chunk?);
        }

        tracing::debug!(reply_len = reply.len(), "Completion finished");
        Ok(reply)
    }
}

impl TextGenerator for ChatClient {
    fn has_credential(&self) -> bool {
        !self.credential_required || self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}
