//! Agent system for markdown personas
//!
//! Agents are plain-text profiles grouped by phase. The registry loads them,
//! the invoker turns a profile into a system prompt for a text-generation call.

pub mod invoker;
pub mod metadata;
pub mod phase;
pub mod registry;
