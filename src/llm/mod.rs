//! Text-generation capability used by the invoker

pub mod anthropic;

use crate::error::Result;

/// One generation call: system instruction plus a single user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest<'a> {
    pub system_prompt: &'a str,
    pub user_message: &'a str,
    pub model: &'a str,
    pub max_tokens: u32,
}

/// Something that can turn a prompt into text
///
/// Implementations must not attempt network access when
/// [`TextGenerator::is_configured`] is false.
pub trait TextGenerator {
    /// Whether a credential is available
    fn is_configured(&self) -> bool;

    /// Where the credential is expected to come from, for error messages
    fn credential_hint(&self) -> &str {
        "ANTHROPIC_API_KEY"
    }

    /// Run one blocking generation call
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory generator for invoker and command tests

    use std::cell::RefCell;

    use super::{GenerateRequest, TextGenerator};
    use crate::error::{AgentError, Result};

    /// A recorded call
    #[derive(Debug, Clone)]
    pub struct Call {
        pub system_prompt: String,
        pub user_message: String,
        pub model: String,
    }

    /// Replies by matching a marker inside the system prompt
    pub struct ScriptedGenerator {
        configured: bool,
        script: Vec<(String, std::result::Result<String, String>)>,
        calls: RefCell<Vec<Call>>,
    }

    impl ScriptedGenerator {
        pub fn new() -> Self {
            Self {
                configured: true,
                script: Vec::new(),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new()
            }
        }

        pub fn reply(mut self, marker: &str, text: &str) -> Self {
            self.script.push((marker.to_string(), Ok(text.to_string())));
            self
        }

        pub fn fail(mut self, marker: &str, message: &str) -> Self {
            self.script.push((marker.to_string(), Err(message.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn is_configured(&self) -> bool {
            self.configured
        }

        fn generate(&self, request: &GenerateRequest<'_>) -> Result<String> {
            self.calls.borrow_mut().push(Call {
                system_prompt: request.system_prompt.to_string(),
                user_message: request.user_message.to_string(),
                model: request.model.to_string(),
            });

            match self.script.iter().find(|(marker, _)| request.system_prompt.contains(marker.as_str())) {
                Some((_, Ok(text))) => Ok(text.clone()),
                Some((_, Err(message))) => Err(AgentError::Transport(message.clone())),
                None => Ok(format!("reply to: {}", request.user_message)),
            }
        }
    }
}
