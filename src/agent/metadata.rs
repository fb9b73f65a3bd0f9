//! Best-effort metadata extraction from profile markdown
//!
//! Profiles are free-form, but most open with labelled lines such as
//!
//! ```markdown
//! - **Role:** **Database Architect**
//! - **Tier:** **Senior**
//!
//! ## PERSONALITY
//! Calm, exacting, allergic to N+1 queries.
//! ```
//!
//! Extraction never fails: anything that does not match leaves the field
//! empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const EMPHASIS: &str = "**";

static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(Role|Tier|Specialty):").unwrap());

/// Metadata derived from a profile's raw text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentMetadata {
    pub role: Option<String>,
    pub tier: Option<String>,
    pub specialty: Option<String>,
    pub personality: Option<String>,
}

/// Ordered by precedence when one line carries several labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LineMatch {
    Role,
    Tier,
    Specialty,
    Personality,
}

/// Classify a line. Labelled fields only count when the line carries emphasis;
/// Role beats Tier beats Specialty wherever they sit on the line.
fn classify(line: &str) -> Option<LineMatch> {
    if line.contains(EMPHASIS)
        && let Some(label) = LABEL
            .captures_iter(line)
            .map(|caps| match &caps[1] {
                "Role" => LineMatch::Role,
                "Tier" => LineMatch::Tier,
                _ => LineMatch::Specialty,
            })
            .min()
    {
        return Some(label);
    }
    if line.contains("PERSONALITY") {
        return Some(LineMatch::Personality);
    }
    None
}

/// Text between the last two `**` markers on the line
fn last_emphasized(line: &str) -> Option<String> {
    let mut parts = line.rsplitn(3, EMPHASIS);
    let _tail = parts.next()?;
    let value = parts.next()?;
    parts.next()?;
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Scan profile text line by line for labelled metadata
pub fn extract_metadata(raw_text: &str) -> AgentMetadata {
    let mut metadata = AgentMetadata::default();
    let lines: Vec<&str> = raw_text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        match classify(line) {
            Some(LineMatch::Role) => {
                if let Some(v) = last_emphasized(line) {
                    metadata.role = Some(v);
                }
            }
            Some(LineMatch::Tier) => {
                if let Some(v) = last_emphasized(line) {
                    metadata.tier = Some(v);
                }
            }
            Some(LineMatch::Specialty) => {
                if let Some(v) = last_emphasized(line) {
                    metadata.specialty = Some(v);
                }
            }
            Some(LineMatch::Personality) => {
                if let Some(next) = lines.get(i + 1) {
                    metadata.personality = Some(next.trim().to_string());
                }
            }
            None => {}
        }
    }

    metadata
}
