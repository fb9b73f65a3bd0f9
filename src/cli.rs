use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::agent::phase::Phase;
use crate::protocol::message::{Priority, Status};

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "agentctl",
    about = "Invoke markdown agent personas against a text-generation API",
    version,
    after_help = "Run without arguments for an interactive conversation.\n\nLogs are written to: ~/.local/share/agentctl/logs/agentctl.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to agentctl.yaml config file")]
    pub config: Option<PathBuf>,

    /// Override the profiles directory
    #[arg(long, global = true)]
    pub profiles_dir: Option<PathBuf>,

    /// Override the model identifier
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Agent id to invoke directly, followed by its task (defaults to "Hello")
    ///
    /// One positional list, so only the first word can name a subcommand.
    #[arg(trailing_var_arg = true, value_name = "AGENT [TASK]")]
    pub invocation: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Agent id and task words of a direct invocation
    pub fn direct_invocation(&self) -> Option<(&str, &[String])> {
        self.invocation.split_first().map(|(agent, task)| (agent.as_str(), task))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List loaded agents grouped by phase
    List {
        /// Only show one phase
        #[arg(long, short = 'p')]
        phase: Option<Phase>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show an agent's location and extracted metadata
    Show {
        /// Agent id
        agent: String,

        /// Print the full profile text
        #[arg(long)]
        profile: bool,

        /// Print the system prompt that would be sent
        #[arg(long, conflicts_with = "profile")]
        prompt: bool,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print a profile file by name, searching phases in scan order
    Cat {
        /// File name, e.g. 03_devin.md
        filename: String,
    },

    /// Ask several agents the same task, one after another
    Ask {
        /// Comma-separated agent ids
        #[arg(long, short = 'a', value_delimiter = ',', required = true)]
        agents: Vec<String>,

        /// Task text
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Gather supporting agents' input, then have a primary agent synthesize
    Collab {
        /// Primary agent id
        primary: String,

        /// Comma-separated supporting agent ids
        #[arg(long = "with", short = 'w', value_delimiter = ',')]
        supporting: Vec<String>,

        /// Task text
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Interactive conversation with one agent
    Chat {
        /// Agent id (prompted for when omitted)
        agent: Option<String>,
    },

    /// Export the registry as JSON
    Export {
        /// Output file
        #[arg(long, short = 'O', default_value = "agent_registry.json")]
        output: PathBuf,
    },

    /// Compose and log inter-agent protocol messages
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum MessageAction {
    /// Compose an agent request
    Request {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,

        #[arg(long, default_value = "")]
        context: String,

        #[arg(long, default_value = "")]
        request: String,

        #[arg(long, default_value = "")]
        deliverable: String,

        #[arg(long, default_value = "")]
        timeline: String,

        /// Append to this communication log file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        format: MessageFormat,
    },

    /// Compose an agent response
    Response {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, value_enum)]
        status: Status,

        #[arg(long, default_value = "")]
        eta: String,

        #[arg(long)]
        questions: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Append to this communication log file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        format: MessageFormat,
    },

    /// Show requests addressed to (or sent by) an agent
    Pending {
        /// Agent id
        agent: String,

        /// Communication log file
        #[arg(long, default_value = "communication_log.json")]
        log: PathBuf,

        /// Show requests sent by the agent instead
        #[arg(long)]
        sent: bool,
    },

    /// Print a fill-in message template
    Template {
        #[arg(value_enum)]
        kind: TemplateKind,
    },
}

/// Rendering of a single protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// `=== AGENT REQUEST ===` block
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    Request,
    Response,
    Directive,
}
