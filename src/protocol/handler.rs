//! Append-only log of agent requests and responses

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::message::{AgentRequest, AgentResponse, Stamped, timestamp};
use crate::error::{AgentError, Result};

#[derive(Serialize)]
struct ExportedLog<'a> {
    requests: Vec<Stamped<'a, AgentRequest>>,
    responses: Vec<Stamped<'a, AgentResponse>>,
    exported_at: String,
}

/// Shape read back from an exported log; timestamps are dropped
#[derive(Deserialize)]
struct ImportedLog {
    #[serde(default)]
    requests: Vec<AgentRequest>,
    #[serde(default)]
    responses: Vec<AgentResponse>,
}

/// Owns the request and response logs for one session
#[derive(Debug, Default)]
pub struct CommunicationHandler {
    requests: Vec<AgentRequest>,
    responses: Vec<AgentResponse>,
}

impl CommunicationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a handler from a previously exported log; a missing file yields an empty log
    pub fn load_log(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| AgentError::io(path, e))?;
        let imported: ImportedLog = serde_json::from_str(&content)?;
        log::debug!(
            "Loaded {} requests and {} responses from {}",
            imported.requests.len(),
            imported.responses.len(),
            path.display()
        );
        Ok(Self {
            requests: imported.requests,
            responses: imported.responses,
        })
    }

    /// Append a request and return the stored copy
    pub fn create_request(&mut self, request: AgentRequest) -> &AgentRequest {
        self.requests.push(request);
        &self.requests[self.requests.len() - 1]
    }

    /// Append a response and return the stored copy
    pub fn create_response(&mut self, response: AgentResponse) -> &AgentResponse {
        self.responses.push(response);
        &self.responses[self.responses.len() - 1]
    }

    pub fn requests(&self) -> &[AgentRequest] {
        &self.requests
    }

    pub fn responses(&self) -> &[AgentResponse] {
        &self.responses
    }

    /// Requests addressed to `agent_id`, in append order
    pub fn requests_for(&self, agent_id: &str) -> Vec<&AgentRequest> {
        self.requests.iter().filter(|r| r.to_agent == agent_id).collect()
    }

    /// Requests sent by `agent_id`, in append order
    pub fn requests_from(&self, agent_id: &str) -> Vec<&AgentRequest> {
        self.requests.iter().filter(|r| r.from_agent == agent_id).collect()
    }

    /// Write both logs plus an export timestamp as JSON
    pub fn export_log(&self, path: &Path) -> Result<()> {
        let exported = ExportedLog {
            requests: self.requests.iter().map(Stamped::now).collect(),
            responses: self.responses.iter().map(Stamped::now).collect(),
            exported_at: timestamp(),
        };
        let json = serde_json::to_string_pretty(&exported)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AgentError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| AgentError::io(path, e))?;

        log::info!("Communication log exported to {}", path.display());
        Ok(())
    }

    /// Numbered report of requests addressed to `agent_id`
    pub fn pending_report(&self, agent_id: &str) -> String {
        let requests = self.requests_for(agent_id);
        if requests.is_empty() {
            return format!("No pending requests for {}", agent_id);
        }

        let rule = "=".repeat(80);
        let divider = "-".repeat(80);
        let mut out = format!("PENDING REQUESTS FOR {}\n{}\n", agent_id, rule);
        for (i, req) in requests.iter().enumerate() {
            let _ = write!(
                out,
                "\nRequest #{}\nFrom: {}\nPriority: {}\nContext: {}\nRequest: {}\nDeliverable: {}\nTimeline: {}\n{}\n",
                i + 1,
                req.from_agent,
                req.priority,
                req.context,
                req.request,
                req.deliverable,
                req.timeline,
                divider
            );
        }
        out
    }
}
