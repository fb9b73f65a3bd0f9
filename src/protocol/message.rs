//! Request and response records

use chrono::{Local, SecondsFormat};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Priority levels for agent requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Status of a response to an agent request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Status {
    Accepted,
    Rejected,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Accepted => "Accepted",
            Status::Rejected => "Rejected",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Blocked => "Blocked",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized request from one agent to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub from_agent: String,
    pub to_agent: String,
    pub priority: Priority,
    pub context: String,
    pub request: String,
    pub deliverable: String,
    pub timeline: String,
}

/// Standardized response to an [`AgentRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub from_agent: String,
    pub to_agent: String,
    pub status: Status,
    pub estimated_completion: String,
    #[serde(default)]
    pub questions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A record plus the time it was serialized
#[derive(Serialize)]
pub(crate) struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    pub record: &'a T,
    pub created_at: String,
}

impl<'a, T: Serialize> Stamped<'a, T> {
    pub(crate) fn now(record: &'a T) -> Self {
        Self {
            record,
            created_at: timestamp(),
        }
    }
}

/// Local time, ISO 8601 with microseconds
pub(crate) fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

impl AgentRequest {
    pub fn new(
        from_agent: impl Into<String>,
        to_agent: impl Into<String>,
        priority: Priority,
        context: impl Into<String>,
        request: impl Into<String>,
        deliverable: impl Into<String>,
        timeline: impl Into<String>,
    ) -> Self {
        Self {
            from_agent: from_agent.into(),
            to_agent: to_agent.into(),
            priority,
            context: context.into(),
            request: request.into(),
            deliverable: deliverable.into(),
            timeline: timeline.into(),
        }
    }

    pub fn to_structured_text(&self) -> String {
        format!(
            "=== AGENT REQUEST ===\n\
             FROM: {}\n\
             TO: {}\n\
             PRIORITY: {}\n\
             CONTEXT: {}\n\
             REQUEST: {}\n\
             DELIVERABLE: {}\n\
             TIMELINE: {}\n\
             === END REQUEST ===",
            self.from_agent, self.to_agent, self.priority, self.context, self.request, self.deliverable, self.timeline
        )
    }

    /// JSON form. `created_at` is taken at call time, not construction time.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Stamped::now(self))?)
    }
}

impl AgentResponse {
    pub fn new(
        from_agent: impl Into<String>,
        to_agent: impl Into<String>,
        status: Status,
        estimated_completion: impl Into<String>,
        questions: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            from_agent: from_agent.into(),
            to_agent: to_agent.into(),
            status,
            estimated_completion: estimated_completion.into(),
            questions,
            notes,
        }
    }

    /// Block form; empty or absent questions/notes are left out
    pub fn to_structured_text(&self) -> String {
        let mut text = format!(
            "=== AGENT RESPONSE ===\n\
             FROM: {}\n\
             TO: {}\n\
             STATUS: {}\n\
             ESTIMATED_COMPLETION: {}",
            self.from_agent, self.to_agent, self.status, self.estimated_completion
        );

        if let Some(questions) = self.questions.as_deref().filter(|q| !q.is_empty()) {
            text.push_str(&format!("\nQUESTIONS: {}", questions));
        }
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            text.push_str(&format!("\nNOTES: {}", notes));
        }

        text.push_str("\n=== END RESPONSE ===");
        text
    }

    /// JSON form. `created_at` is taken at call time, not construction time.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Stamped::now(self))?)
    }
}
