//! Agent registry: discovery and lookup of markdown profiles
//!
//! Profiles live at `<root>/<phase>/<id>.md`. A scan walks the phase
//! directories in [`Phase::ALL`] order and keeps records in that order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::metadata::{AgentMetadata, extract_metadata};
use super::phase::Phase;
use crate::error::{AgentError, Result};

const PROFILE_EXTENSION: &str = "md";

/// What to do when two phases define the same agent id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Later phase replaces the earlier record (logged)
    #[default]
    Overwrite,
    /// Abort the scan with a conflict error
    Reject,
}

/// A loaded agent profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    /// File stem, e.g. "02_dana_querymaster"
    pub id: String,
    pub filename: String,
    pub phase: Phase,
    pub source_path: PathBuf,
    pub raw_text: String,
}

impl AgentRecord {
    pub fn metadata(&self) -> AgentMetadata {
        extract_metadata(&self.raw_text)
    }

    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id.clone(),
            filename: self.filename.clone(),
            phase: self.phase,
            path: self.source_path.display().to_string(),
        }
    }
}

/// Registry entry as written to the export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: String,
    pub filename: String,
    pub phase: Phase,
    pub path: String,
}

#[derive(Debug, Serialize)]
struct RegistrySnapshot {
    agents: Vec<AgentSummary>,
    total_agents: usize,
    phases: indexmap::IndexMap<Phase, Vec<AgentSummary>>,
}

/// Ordered catalog of agent records
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<AgentRecord>,
}

impl Registry {
    /// Scan all phase directories under `root`
    ///
    /// Unreadable files are logged and skipped. Only a duplicate id under
    /// [`DuplicatePolicy::Reject`] fails the scan.
    pub fn scan(root: &Path, duplicates: DuplicatePolicy) -> Result<Self> {
        let mut registry = Registry::default();

        for phase in Phase::ALL {
            let phase_dir = root.join(phase.dir_name());
            if !phase_dir.is_dir() {
                log::debug!("Skipping missing phase directory: {}", phase_dir.display());
                continue;
            }

            let walker = WalkDir::new(&phase_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();

            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        log::warn!("Error walking {}: {}", phase_dir.display(), e);
                        continue;
                    }
                };

                let path = entry.path();
                if !entry.file_type().is_file() || !is_profile(path) {
                    continue;
                }

                match load_record(path, phase) {
                    Ok(record) => registry.insert(record, duplicates)?,
                    Err(e) => {
                        log::warn!("Error loading agent from {}: {}", path.display(), e);
                    }
                }
            }
        }

        log::info!("Loaded {} agents from {}", registry.len(), root.display());
        Ok(registry)
    }

    /// Add a record, applying the duplicate policy on id collisions
    pub fn insert(&mut self, record: AgentRecord, duplicates: DuplicatePolicy) -> Result<()> {
        if let Some(pos) = self.records.iter().position(|r| r.id == record.id) {
            let existing = &self.records[pos];
            match duplicates {
                DuplicatePolicy::Reject => {
                    return Err(AgentError::Conflict {
                        id: record.id,
                        first: existing.source_path.clone(),
                        second: record.source_path,
                    });
                }
                DuplicatePolicy::Overwrite => {
                    log::warn!(
                        "Agent '{}' in {} overrides {}",
                        record.id,
                        record.source_path.display(),
                        existing.source_path.display()
                    );
                    self.records.remove(pos);
                }
            }
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&AgentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in scan order
    pub fn records(&self) -> &[AgentRecord] {
        &self.records
    }

    /// Records belonging to `phase`, in scan order
    pub fn filter_by_phase(&self, phase: Phase) -> Vec<&AgentRecord> {
        self.records.iter().filter(|r| r.phase == phase).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the registry and a per-phase breakdown as JSON
    pub fn export_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AgentError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| AgentError::io(path, e))?;

        log::info!("Agent registry exported to {}", path.display());
        Ok(())
    }

    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            agents: self.records.iter().map(AgentRecord::summary).collect(),
            total_agents: self.records.len(),
            phases: Phase::ALL
                .into_iter()
                .map(|phase| {
                    let agents = self.filter_by_phase(phase).into_iter().map(AgentRecord::summary).collect();
                    (phase, agents)
                })
                .collect(),
        }
    }
}

/// Read a profile by file name, searching phases in scan order
pub fn load_one(root: &Path, filename: &str) -> Result<String> {
    for phase in Phase::ALL {
        let path = root.join(phase.dir_name()).join(filename);
        if path.is_file() {
            return fs::read_to_string(&path).map_err(|e| AgentError::io(&path, e));
        }
    }
    Err(AgentError::ProfileNotFound(filename.to_string()))
}

fn is_profile(path: &Path) -> bool {
    path.extension().map(|e| e == PROFILE_EXTENSION).unwrap_or(false)
}

fn load_record(path: &Path, phase: Phase) -> Result<AgentRecord> {
    let raw_text = fs::read_to_string(path).map_err(|e| AgentError::io(path, e))?;

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(AgentRecord {
        id,
        filename,
        phase,
        source_path: path.to_path_buf(),
        raw_text,
    })
}
