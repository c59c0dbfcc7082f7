//! Report output model for headless scenario runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

use crate::host::HostSnapshot;

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// A step that did not hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step_index: usize,
    /// Step type, e.g. `assert_offset`.
    pub assertion: String,
    pub code: String,
    pub message: String,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub steps_executed: usize,
    pub failures: Vec<StepFailure>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Host state after the last step.
    pub snapshot: HostSnapshot,
}

impl HeadlessReport {
    pub fn new(
        steps_executed: usize,
        failures: Vec<StepFailure>,
        elapsed_frames: u64,
        elapsed_ms: u64,
        snapshot: HostSnapshot,
    ) -> Self {
        let status = if failures.is_empty() {
            ReportStatus::Passed
        } else {
            ReportStatus::Failed
        };
        Self {
            status,
            steps_executed,
            failures,
            elapsed_frames,
            elapsed_ms,
            snapshot,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
