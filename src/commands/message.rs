//! Protocol message commands

use colored::*;
use eyre::{Context, Result};
use std::path::Path;

use crate::cli::{MessageAction, MessageFormat, TemplateKind};
use crate::protocol::handler::CommunicationHandler;
use crate::protocol::message::{AgentRequest, AgentResponse};
use crate::protocol::templates::{AGENT_REQUEST_TEMPLATE, AGENT_RESPONSE_TEMPLATE, PROJECT_LEAD_DIRECTIVE_TEMPLATE};

pub fn run(action: MessageAction) -> Result<()> {
    match action {
        MessageAction::Request {
            from,
            to,
            priority,
            context,
            request,
            deliverable,
            timeline,
            log,
            format,
        } => {
            let request = AgentRequest::new(from, to, priority, context, request, deliverable, timeline);
            let rendered = match format {
                MessageFormat::Text => request.to_structured_text(),
                MessageFormat::Json => request.to_json()?,
            };
            if let Some(path) = log {
                append(&path, |handler| {
                    handler.create_request(request);
                })?;
            }
            println!("{}", rendered);
            Ok(())
        }
        MessageAction::Response {
            from,
            to,
            status,
            eta,
            questions,
            notes,
            log,
            format,
        } => {
            let response = AgentResponse::new(from, to, status, eta, questions, notes);
            let rendered = match format {
                MessageFormat::Text => response.to_structured_text(),
                MessageFormat::Json => response.to_json()?,
            };
            if let Some(path) = log {
                append(&path, |handler| {
                    handler.create_response(response);
                })?;
            }
            println!("{}", rendered);
            Ok(())
        }
        MessageAction::Pending { agent, log, sent } => pending(&agent, &log, sent),
        MessageAction::Template { kind } => {
            let template = match kind {
                TemplateKind::Request => AGENT_REQUEST_TEMPLATE,
                TemplateKind::Response => AGENT_RESPONSE_TEMPLATE,
                TemplateKind::Directive => PROJECT_LEAD_DIRECTIVE_TEMPLATE,
            };
            println!("{}", template);
            Ok(())
        }
    }
}

/// Load a log file, apply `f`, and write it back
fn append(path: &Path, f: impl FnOnce(&mut CommunicationHandler)) -> Result<()> {
    let mut handler = CommunicationHandler::load_log(path)
        .with_context(|| format!("Failed to read communication log {}", path.display()))?;
    f(&mut handler);
    handler
        .export_log(path)
        .with_context(|| format!("Failed to write communication log {}", path.display()))?;
    eprintln!(
        "{} Logged to {} ({} requests, {} responses)",
        "✓".green(),
        path.display(),
        handler.requests().len(),
        handler.responses().len()
    );
    Ok(())
}

fn pending(agent: &str, log: &Path, sent: bool) -> Result<()> {
    let handler = CommunicationHandler::load_log(log)
        .with_context(|| format!("Failed to read communication log {}", log.display()))?;

    if !sent {
        println!("{}", handler.pending_report(agent));
        return Ok(());
    }

    let requests = handler.requests_from(agent);
    if requests.is_empty() {
        println!("No requests sent by {}", agent);
    }
    for request in requests {
        println!("{}\n", request.to_structured_text());
    }
    Ok(())
}
