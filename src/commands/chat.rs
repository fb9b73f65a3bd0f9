//! Interactive conversation mode

use colored::*;
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::agent::invoker::AgentInvoker;
use crate::config::Config;
use crate::llm::TextGenerator;

use super::agent::render_registry;
use super::{client, load_registry};

const EXIT_TOKEN: &str = "exit";

pub fn run(agent: Option<String>, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let client = client(config)?;
    let invoker = AgentInvoker::new(&registry, &client, &config.llm.model, config.llm.max_tokens);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    converse(&invoker, agent, &mut input, &mut output)
}

/// Pick an agent, then relay lines to it until `exit` or end of input
///
/// Each line is an independent invocation; nothing is carried between turns.
pub fn converse<G, R, W>(invoker: &AgentInvoker<'_, G>, agent: Option<String>, input: &mut R, output: &mut W) -> Result<()>
where
    G: TextGenerator + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n{}", "AGENT CONVERSATION MODE".bold())?;
    writeln!(output, "{}", "=".repeat(80))?;
    write!(output, "{}", render_registry(invoker.registry(), None))?;

    let agent_id = match agent {
        Some(id) => id,
        None => {
            write!(output, "\nChoose an agent: ")?;
            output.flush()?;
            match read_line(input)? {
                Some(line) => line.trim().to_string(),
                None => return Ok(()),
            }
        }
    };

    if invoker.registry().get(&agent_id).is_none() {
        writeln!(output, "{} Agent not found: {}", "✗".red(), agent_id)?;
        return Ok(());
    }

    writeln!(output, "\n{} Starting conversation with {}", "✓".green(), agent_id.bold())?;
    writeln!(output, "Type '{}' to end conversation\n", EXIT_TOKEN)?;
    log::info!("Conversation started with {}", agent_id);

    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };
        let line = line.trim();

        if line == EXIT_TOKEN {
            writeln!(output, "Conversation ended.")?;
            break;
        }
        if line.is_empty() {
            continue;
        }

        match invoker.invoke(&agent_id, line) {
            Ok(response) => writeln!(output, "\n{}: {}\n", agent_id.cyan(), response)?,
            Err(e) => writeln!(output, "{} Error: {}\n", "✗".red(), e)?,
        }
    }

    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("Failed to read input")?;
    Ok(if n == 0 { None } else { Some(line) })
}
