//! Single, batch and collaborative invocation commands

use colored::*;
use eyre::Result;
use indexmap::IndexMap;

use crate::agent::invoker::{AgentInvoker, CollaborationResult, Invocation};
use crate::cli::OutputFormat;
use crate::config::Config;

use super::{client, load_registry};

pub fn single(agent: &str, task: &[String], config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let client = client(config)?;
    let invoker = AgentInvoker::new(&registry, &client, &config.llm.model, config.llm.max_tokens);

    let task = task_text(task, "Hello");
    match invoker.invoke(agent, &task) {
        Ok(response) => println!("\n{} Response:\n{}", agent.green().bold(), response),
        Err(e) => eprintln!("{} Error: {}", "✗".red(), e),
    }

    Ok(())
}

pub fn ask(agents: &[String], task: &[String], format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let client = client(config)?;
    let invoker = AgentInvoker::new(&registry, &client, &config.llm.model, config.llm.max_tokens);

    let responses = invoker.invoke_many(agents, &task_text(task, ""));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&responses)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&responses)?),
        OutputFormat::Text => print_responses(&responses),
    }

    Ok(())
}

pub fn collab(primary: &str, supporting: &[String], task: &[String], format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let client = client(config)?;
    let invoker = AgentInvoker::new(&registry, &client, &config.llm.model, config.llm.max_tokens);

    let result = invoker.collaborative_task(primary, supporting, &task_text(task, ""));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&result)?),
        OutputFormat::Text => print_collaboration(&result),
    }

    Ok(())
}

fn task_text(words: &[String], fallback: &str) -> String {
    if words.is_empty() {
        fallback.to_string()
    } else {
        words.join(" ")
    }
}

fn print_outcome(agent: &str, outcome: &Invocation) {
    match outcome {
        Invocation::Success { text } => {
            println!("{} {}", "●".green(), agent.bold());
            println!("{}", text);
        }
        Invocation::Failure { message, .. } => {
            println!("{} {}", "✗".red(), agent.bold());
            println!("{}", message.red());
        }
    }
    println!();
}

fn print_responses(responses: &IndexMap<String, Invocation>) {
    for (agent, outcome) in responses {
        print_outcome(agent, outcome);
    }
    let ok = responses.values().filter(|o| o.is_success()).count();
    println!("{}", format!("{} of {} agents responded", ok, responses.len()).dimmed());
    println!();
}

fn print_collaboration(result: &CollaborationResult) {
    println!("{} {}", "Task:".bold(), result.task);
    println!();

    if !result.supporting_responses.is_empty() {
        println!("{}", "Supporting input".bold().underline());
        println!();
        print_responses(&result.supporting_responses);
    }

    println!("{} {}", "Primary response from".bold().underline(), result.primary_agent.cyan());
    println!();
    print_outcome(&result.primary_agent, &result.primary_response);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_text() {
        assert_eq!(task_text(&[], "Hello"), "Hello");
        let words = vec!["design".to_string(), "the".to_string(), "schema".to_string()];
        assert_eq!(task_text(&words, "Hello"), "design the schema");
    }
}
