/// Core data model shared across all Scout crates.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::ScoutError;

/// Parameters for one bounded fetch invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    pub channel_url: String,
    pub max_items: usize,
    pub destination_dir: PathBuf,
    pub output_container: String,
    pub write_info_json: bool,
}

impl FetchRequest {
    /// Fail fast on a blank channel identifier. No partial work is
    /// attempted after a validation failure.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.channel_url.trim().is_empty() {
            return Err(ScoutError::Config("channel identifier not set".into()));
        }
        Ok(())
    }
}

/// One discovered channel item, before any content transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchReport {
    pub total_discovered: usize,
    pub downloaded_count: usize,
    pub total_size_bytes: u64,
    pub files: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// Runner phase. Succeeded and Failed are terminal; every invocation
/// starts at Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    Validating,
    Discovering,
    Retrieving,
    Accounting,
    Succeeded,
    Failed,
}

impl FetchPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchPhase::Succeeded | FetchPhase::Failed)
    }
}

impl std::fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPhase::Idle => write!(f, "idle"),
            FetchPhase::Validating => write!(f, "validating"),
            FetchPhase::Discovering => write!(f, "discovering"),
            FetchPhase::Retrieving => write!(f, "retrieving"),
            FetchPhase::Accounting => write!(f, "accounting"),
            FetchPhase::Succeeded => write!(f, "succeeded"),
            FetchPhase::Failed => write!(f, "failed"),
        }
    }
}
