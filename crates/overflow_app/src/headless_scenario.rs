//! Scenario definition for headless overflow runs.

use anyhow::Result;
use overflow_widgets::OverflowConfig;
use serde::Deserialize;
use std::path::Path;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

/// A container setup and the steps to run against it.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    /// Size of the container box.
    pub viewport: Extent,
    /// Size of the scrolling content.
    pub content: Extent,
    #[serde(default)]
    pub config: OverflowConfig,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

fn default_tolerance() -> f32 {
    0.5
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Move the pointer onto a hover region (`left`, `right`, `up`, `down`).
    Hover { region: String },
    /// Move the pointer out of the container.
    Leave,
    /// Move the pointer to a position.
    Pointer { x: f32, y: f32 },
    Wheel {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    ScrollTo {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Resize { width: f32, height: f32 },
    Wait { ms: u64 },
    Unmount,
    AssertOffset {
        x: Option<f32>,
        y: Option<f32>,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    /// Rendered indicators, in any order.
    AssertIndicators { expected: Vec<String> },
    /// `idle` or `scrolling:<direction>`.
    AssertState { state: String },
}

impl ScenarioStep {
    /// Step name as written in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Hover { .. } => "hover",
            ScenarioStep::Leave => "leave",
            ScenarioStep::Pointer { .. } => "pointer",
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::ScrollTo { .. } => "scroll_to",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Unmount => "unmount",
            ScenarioStep::AssertOffset { .. } => "assert_offset",
            ScenarioStep::AssertIndicators { .. } => "assert_indicators",
            ScenarioStep::AssertState { .. } => "assert_state",
        }
    }
}
