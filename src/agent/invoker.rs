//! Agent invocation against a text-generation capability
//!
//! Every call is a stateless exchange: the agent's profile becomes the system
//! prompt and the task becomes the single user message. Batch calls run
//! sequentially in input order and never fail as a whole.

use indexmap::IndexMap;
use serde::Serialize;

use super::registry::{AgentRecord, Registry};
use crate::error::{AgentError, ErrorKind, Result};
use crate::llm::{GenerateRequest, TextGenerator};

/// Per-agent outcome of a batch call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Invocation {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl Invocation {
    pub fn is_success(&self) -> bool {
        matches!(self, Invocation::Success { .. })
    }

    /// Text shown to a downstream agent or user; failures read "Error: ..."
    pub fn display_text(&self) -> String {
        match self {
            Invocation::Success { text } => text.clone(),
            Invocation::Failure { message, .. } => format!("Error: {}", message),
        }
    }
}

impl From<Result<String>> for Invocation {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Invocation::Success { text },
            Err(e) => Invocation::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Outcome of a supporting-then-primary collaboration
#[derive(Debug, Clone, Serialize)]
pub struct CollaborationResult {
    pub primary_agent: String,
    pub supporting_agents: Vec<String>,
    pub task: String,
    pub supporting_responses: IndexMap<String, Invocation>,
    pub primary_response: Invocation,
}

/// Invokes agents from a loaded registry
pub struct AgentInvoker<'a, G: TextGenerator + ?Sized> {
    registry: &'a Registry,
    generator: &'a G,
    model: String,
    max_tokens: u32,
}

impl<'a, G: TextGenerator + ?Sized> AgentInvoker<'a, G> {
    pub fn new(registry: &'a Registry, generator: &'a G, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            registry,
            generator,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Run one agent on a task and return the generated text verbatim
    pub fn invoke(&self, agent_id: &str, task: &str) -> Result<String> {
        let record = self
            .registry
            .get(agent_id)
            .ok_or_else(|| AgentError::AgentNotFound(agent_id.to_string()))?;

        if !self.generator.is_configured() {
            return Err(AgentError::Configuration(format!(
                "API key not configured. Set {} environment variable.",
                self.generator.credential_hint()
            )));
        }

        log::info!("Invoking agent {} (model={})", agent_id, self.model);
        let system_prompt = system_prompt(record);
        let request = GenerateRequest {
            system_prompt: &system_prompt,
            user_message: task,
            model: &self.model,
            max_tokens: self.max_tokens,
        };

        self.generator.generate(&request).inspect_err(|e| {
            log::warn!("Agent {} failed: {}", agent_id, e);
        })
    }

    /// Run each agent on the same task, one at a time
    pub fn invoke_many<S: AsRef<str>>(&self, agent_ids: &[S], task: &str) -> IndexMap<String, Invocation> {
        agent_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                (id.to_string(), Invocation::from(self.invoke(id, task)))
            })
            .collect()
    }

    /// Gather supporting agents' input, then let the primary agent synthesize
    pub fn collaborative_task<S: AsRef<str>>(
        &self,
        primary_agent: &str,
        supporting_agents: &[S],
        task: &str,
    ) -> CollaborationResult {
        let supporting_responses = self.invoke_many(supporting_agents, task);
        let combined = combined_task(task, &supporting_responses);
        let primary_response = Invocation::from(self.invoke(primary_agent, &combined));

        CollaborationResult {
            primary_agent: primary_agent.to_string(),
            supporting_agents: supporting_agents.iter().map(|s| s.as_ref().to_string()).collect(),
            task: task.to_string(),
            supporting_responses,
            primary_response,
        }
    }
}

/// System instruction built from an agent's full profile
pub fn system_prompt(record: &AgentRecord) -> String {
    format!(
        "You are an AI agent with the following profile:\n\n{}\n\n\
         Follow the instructions and personality defined in your profile. \
         Maintain consistency with your role, expertise, and communication style.",
        record.raw_text
    )
}

fn combined_task(task: &str, supporting: &IndexMap<String, Invocation>) -> String {
    let context = supporting
        .iter()
        .map(|(id, outcome)| format!("Input from {}:\n{}", id, outcome.display_text()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nSupporting agent inputs:\n{}\n\n\
         Please provide your response as the primary agent, integrating the supporting input.",
        task, context
    )
}
