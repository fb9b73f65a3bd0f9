//! Command handlers

pub mod agent;
pub mod chat;
pub mod completions;
pub mod export;
pub mod invoke;
pub mod message;

use eyre::{Context, Result};

use crate::agent::registry::Registry;
use crate::config::Config;
use crate::llm::anthropic::AnthropicClient;

/// Scan the configured profiles directory
pub fn load_registry(config: &Config) -> Result<Registry> {
    let root = config.profiles_root();
    Registry::scan(&root, config.duplicates).with_context(|| format!("Failed to load agents from {}", root.display()))
}

/// Production text-generation client for the configured provider
pub fn client(config: &Config) -> Result<AnthropicClient> {
    AnthropicClient::from_config(&config.llm).context("Failed to configure API client")
}
