//! Error types for agent loading, invocation and message logs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Agent error type
#[derive(Debug, Error)]
pub enum AgentError {
    /// No agent with this id in the loaded registry
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// No phase directory contains this profile file
    #[error("Agent file not found: {0}")]
    ProfileNotFound(String),

    /// Missing credential or unusable configuration
    #[error("{0}")]
    Configuration(String),

    /// The text-generation call failed
    #[error("Text generation failed: {0}")]
    Transport(String),

    /// Filesystem failure on a profile or export file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two phases define the same agent id and duplicates are rejected
    #[error("Duplicate agent id '{id}': {} conflicts with {}", .second.display(), .first.display())]
    Conflict { id: String, first: PathBuf, second: PathBuf },

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Coarse classification of an [`AgentError`], carried in batch results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Configuration,
    Transport,
    Io,
    Conflict,
    Serialization,
}

impl AgentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AgentError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::AgentNotFound(_) | AgentError::ProfileNotFound(_) => ErrorKind::NotFound,
            AgentError::Configuration(_) => ErrorKind::Configuration,
            AgentError::Transport(_) => ErrorKind::Transport,
            AgentError::Io { .. } => ErrorKind::Io,
            AgentError::Conflict { .. } => ErrorKind::Conflict,
            AgentError::Serialize(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AgentError>;
