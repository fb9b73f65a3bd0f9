//! End-to-end tests for the agentctl binary
//!
//! Every test runs against its own profile tree, config dir and log dir, with
//! no API key, so nothing reaches the network.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        Self { dir }
    }

    fn with_profiles() -> Self {
        let ws = Self::new();
        ws.profile(
            "leadership",
            "01_god_mode.md",
            "# God Mode\n- **Role:** **Project Lead**\n- **Tier:** **Executive**\n\n## PERSONALITY\nDecisive and calm.\n",
        );
        ws.profile("development", "03_devin.md", "# Devin\n- **Specialty:** **Backend APIs**\n");
        ws.profile("qa", "05_tess.md", "# Tess\nTests everything.\n");
        ws
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn profiles(&self) -> PathBuf {
        self.path().join("profiles")
    }

    fn profile(&self, phase: &str, name: &str, content: &str) {
        let dir = self.profiles().join(phase);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_agentctl"))
            .current_dir(self.path())
            .env("AGENTCTL_DIR", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("AGENTCTL_CONFIG")
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("RUST_LOG")
            .arg("--profiles-dir")
            .arg(self.profiles())
            .args(args)
            .output()
            .expect("Failed to execute agentctl")
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "agentctl {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

#[test]
fn test_list_json_in_scan_order() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["list", "-o", "json"]);

    let agents: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<&str> = agents
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["01_god_mode", "03_devin", "05_tess"]);
    assert_eq!(agents[1]["phase"], "development");
}

#[test]
fn test_list_filtered_by_phase() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["list", "--phase", "qa", "-o", "json"]);

    let agents: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(agents.as_array().unwrap().len(), 1);
    assert_eq!(agents[0]["id"], "05_tess");
}

#[test]
fn test_list_text_groups_phases() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["list", "-o", "text"]);
    assert!(out.contains("Leadership (Always Active)"));
    assert!(out.contains("Phase 2: Development & Implementation"));
    assert!(!out.contains("Phase 1: Planning"));
}

#[test]
fn test_list_empty_store() {
    let ws = Workspace::new();
    let out = ws.stdout(&["list", "-o", "text"]);
    assert!(out.contains("No agents found"));
}

#[test]
fn test_show_metadata_json() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["show", "01_god_mode", "-o", "json"]);

    let details: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(details["id"], "01_god_mode");
    assert_eq!(details["phase"], "leadership");
    assert_eq!(details["metadata"]["role"], "Project Lead");
    assert_eq!(details["metadata"]["tier"], "Executive");
    assert_eq!(details["metadata"]["personality"], "Decisive and calm.");
    assert!(details["metadata"]["specialty"].is_null());
}

#[test]
fn test_show_prompt_embeds_profile() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["show", "03_devin", "--prompt"]);
    assert!(out.starts_with("You are an AI agent with the following profile:"));
    assert!(out.contains("# Devin"));
}

#[test]
fn test_cat_reads_profile_by_filename() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["cat", "05_tess.md"]);
    assert!(out.contains("Tests everything."));

    let missing = ws.run(&["cat", "nobody.md"]);
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Agent file not found: nobody.md"));
}

#[test]
fn test_export_registry_file() {
    let ws = Workspace::with_profiles();
    ws.stdout(&["export", "--output", "out/agent_registry.json"]);

    let content = fs::read_to_string(ws.path().join("out").join("agent_registry.json")).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(snapshot["total_agents"], 3);
    assert_eq!(snapshot["phases"]["qa"][0]["id"], "05_tess");
    assert_eq!(snapshot["phases"]["planning"].as_array().unwrap().len(), 0);
}

#[test]
fn test_invoke_without_api_key_exits_gracefully() {
    let ws = Workspace::with_profiles();
    let output = ws.run(&["03_devin", "build", "the", "API"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key not configured"), "stderr: {}", stderr);
}

#[test]
fn test_task_starting_with_command_name_goes_to_agent() {
    let ws = Workspace::with_profiles();
    let output = ws.run(&["03_devin", "list", "the", "agents"]);

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("\"id\""));
    assert!(String::from_utf8_lossy(&output.stderr).contains("API key not configured"));
}

#[test]
fn test_invoke_unknown_agent() {
    let ws = Workspace::with_profiles();
    let output = ws.run(&["ghost", "hello"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Agent not found: ghost"));
}

#[test]
fn test_ask_reports_each_failure_kind() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&["ask", "-o", "json", "--agents", "03_devin,ghost", "review", "this"]);

    let results: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(results["03_devin"]["status"], "failure");
    assert_eq!(results["03_devin"]["kind"], "configuration");
    assert_eq!(results["ghost"]["kind"], "not_found");
}

#[test]
fn test_collab_without_api_key_still_reports() {
    let ws = Workspace::with_profiles();
    let out = ws.stdout(&[
        "collab",
        "01_god_mode",
        "-o",
        "json",
        "--with",
        "03_devin,05_tess",
        "design",
        "the",
        "schema",
    ]);

    let result: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(result["task"], "design the schema");
    assert_eq!(result["primary_agent"], "01_god_mode");
    assert_eq!(result["supporting_responses"].as_object().unwrap().len(), 2);
    assert_eq!(result["primary_response"]["kind"], "configuration");
}

#[test]
fn test_message_request_logged_and_pending() {
    let ws = Workspace::new();
    let out = ws.stdout(&[
        "message",
        "request",
        "--from",
        "devin",
        "--to",
        "dana",
        "--priority",
        "high",
        "--context",
        "Dashboard is slow",
        "--request",
        "Add indexes",
        "--deliverable",
        "p95 < 50ms",
        "--timeline",
        "EOD",
        "--log",
        "comms.json",
    ]);
    assert!(out.starts_with("=== AGENT REQUEST ===\nFROM: devin\nTO: dana\nPRIORITY: High\n"));
    assert!(out.contains("=== END REQUEST ==="));

    let log: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.path().join("comms.json")).unwrap()).unwrap();
    assert_eq!(log["requests"].as_array().unwrap().len(), 1);
    assert!(log["exported_at"].is_string());

    let pending = ws.stdout(&["message", "pending", "dana", "--log", "comms.json"]);
    assert!(pending.contains("PENDING REQUESTS FOR dana"));
    assert!(pending.contains("Request: Add indexes"));

    let sent = ws.stdout(&["message", "pending", "devin", "--log", "comms.json", "--sent"]);
    assert!(sent.contains("TO: dana"));

    let none = ws.stdout(&["message", "pending", "devin", "--log", "comms.json"]);
    assert!(none.contains("No pending requests for devin"));
}

#[test]
fn test_message_response_omits_missing_notes() {
    let ws = Workspace::new();
    let out = ws.stdout(&[
        "message",
        "response",
        "--from",
        "dana",
        "--to",
        "devin",
        "--status",
        "in-progress",
        "--eta",
        "3 hours",
    ]);
    assert!(out.contains("STATUS: In Progress"));
    assert!(out.contains("ESTIMATED_COMPLETION: 3 hours"));
    assert!(!out.contains("NOTES:"));
    assert!(!out.contains("QUESTIONS:"));
}

#[test]
fn test_message_template() {
    let ws = Workspace::new();
    let out = ws.stdout(&["message", "template", "directive"]);
    assert!(out.starts_with("=== PROJECT LEAD DIRECTIVE ==="));
    assert!(out.contains("SUCCESS CRITERIA:"));
}

#[test]
fn test_duplicate_reject_policy_fails() {
    let ws = Workspace::new();
    ws.profile("planning", "shared.md", "one");
    ws.profile("qa", "shared.md", "two");
    fs::write(ws.path().join("strict.yaml"), "duplicates: reject\n").unwrap();

    let output = ws.run(&["--config", "strict.yaml", "list", "-o", "json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Duplicate agent id 'shared'"));
}
