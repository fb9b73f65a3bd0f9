//! Phase categories that group agent profiles

use serde::{Deserialize, Serialize};

/// One of the fixed phase directories under the profiles root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Leadership,
    Planning,
    Development,
    Qa,
    Deployment,
}

impl Phase {
    /// Scan order. Later phases win when duplicate ids are overwritten.
    pub const ALL: [Phase; 5] = [
        Phase::Leadership,
        Phase::Planning,
        Phase::Development,
        Phase::Qa,
        Phase::Deployment,
    ];

    /// Directory name under the profiles root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Phase::Leadership => "leadership",
            Phase::Planning => "planning",
            Phase::Development => "development",
            Phase::Qa => "qa",
            Phase::Deployment => "deployment",
        }
    }

    /// Heading used in registry reports
    pub fn title(&self) -> &'static str {
        match self {
            Phase::Leadership => "Leadership (Always Active)",
            Phase::Planning => "Phase 1: Planning & Architecture",
            Phase::Development => "Phase 2: Development & Implementation",
            Phase::Qa => "Phase 3: Quality Assurance",
            Phase::Deployment => "Phase 4: Deployment & Operations",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.dir_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown phase: {}. Expected one of: leadership, planning, development, qa, deployment",
                    s
                )
            })
    }
}
