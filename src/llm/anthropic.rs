//! Anthropic Messages API client

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{GenerateRequest, TextGenerator};
use crate::config::{Config, LlmConfig};
use crate::error::{AgentError, Result};

const API_VERSION: &str = "2023-06-01";

/// Messages API request structures
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Messages API response structures
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Blocking client for `POST /v1/messages`
pub struct AnthropicClient {
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>, llm: &LlmConfig) -> Self {
        Self {
            api_key,
            api_key_env: llm.api_key_env.clone(),
            base_url: llm.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client, resolving the credential from env or the `.env` file
    pub fn from_config(llm: &LlmConfig) -> Result<Self> {
        let api_key = resolve_api_key(&llm.api_key_env, &Config::agentctl_dir().join(".env"))?;
        if api_key.is_none() {
            log::debug!("No credential found for {}", llm.api_key_env);
        }
        Ok(Self::new(api_key, llm))
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

impl TextGenerator for AnthropicClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential_hint(&self) -> &str {
        &self.api_key_env
    }

    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AgentError::Configuration(format!(
                "API key not configured. Set {} environment variable.",
                self.credential_hint()
            ))
        })?;

        log::info!("Calling {} with model={}", self.endpoint(), request.model);

        let body = serde_json::to_string(&MessagesRequest {
            model: request.model,
            max_tokens: request.max_tokens,
            system: request.system_prompt,
            messages: vec![Message {
                role: "user",
                content: request.user_message,
            }],
        })?;

        let mut response = ureq::post(&self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .send(body.as_bytes())
            .map_err(|e| AgentError::Transport(format!("Failed to call Messages API: {}", e)))?;

        let response_body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AgentError::Transport(format!("Failed to read response: {}", e)))?;

        extract_text(&response_body)
    }
}

/// Pull the first text block out of a Messages API response body
fn extract_text(body: &str) -> Result<String> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| AgentError::Transport(format!("Failed to parse Messages API response: {}", e)))?;

    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .ok_or_else(|| AgentError::Transport("No text content in Messages API response".into()))
}

/// Look up a credential in the environment, then in a `KEY=value` file
fn resolve_api_key(env_var: &str, env_file: &Path) -> Result<Option<String>> {
    if let Ok(key) = std::env::var(env_var)
        && !key.trim().is_empty()
    {
        return Ok(Some(key));
    }

    if !env_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(env_file).map_err(|e| AgentError::io(env_file, e))?;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once('=')
            && key.trim() == env_var
        {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                return Ok(Some(value.to_string()));
            }
        }
    }

    Ok(None)
}
