//! Scenario runner that drives a [`HeadlessHost`] step by step.
//!
//! Every step runs even after an assertion fails; the report lists all
//! failures. Only host errors (layout failures, poisoned locks) abort a run.

use anyhow::{bail, Result};
use overflow_widgets::OverflowContainer;

use crate::headless_assert::{
    evaluate_assert_indicators, evaluate_assert_offset, evaluate_assert_state, AssertionResult,
};
use crate::headless_report::{HeadlessReport, StepFailure};
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::host::HeadlessHost;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON.
pub fn run_scenario(input: &str, runtime_cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, runtime_cfg)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    if runtime_cfg.tick_ms == 0 {
        bail!("headless tick_ms must be > 0");
    }

    let container = OverflowContainer::with_config(scenario.config.clone());
    let mut host = HeadlessHost::new(
        container,
        scenario.viewport.width,
        scenario.viewport.height,
        (scenario.content.width, scenario.content.height),
    )?;

    let mut failures = Vec::new();
    let mut elapsed_frames: u64 = 0;
    let mut elapsed_ms: u64 = 0;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {}: {:?}", step_index, step);

        let result = match step {
            ScenarioStep::Hover { region } => {
                if host.hover(region)? {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed {
                        code: "missing_region".to_string(),
                        message: format!("{region}: hover region not rendered"),
                    }
                }
            }
            ScenarioStep::Leave => {
                host.pointer_exit()?;
                AssertionResult::Passed
            }
            ScenarioStep::Pointer { x, y } => {
                host.pointer_move(*x, *y)?;
                AssertionResult::Passed
            }
            ScenarioStep::Wheel { dx, dy } => {
                host.wheel(*dx, *dy)?;
                AssertionResult::Passed
            }
            ScenarioStep::ScrollTo { x, y } => {
                host.scroll_to(*x, *y)?;
                AssertionResult::Passed
            }
            ScenarioStep::Resize { width, height } => {
                host.resize(*width, *height)?;
                AssertionResult::Passed
            }
            ScenarioStep::Wait { ms } => {
                run_wait(
                    &mut host,
                    runtime_cfg,
                    *ms,
                    &mut elapsed_frames,
                    &mut elapsed_ms,
                )?;
                AssertionResult::Passed
            }
            ScenarioStep::Unmount => {
                host.unmount()?;
                AssertionResult::Passed
            }
            ScenarioStep::AssertOffset { x, y, tolerance } => {
                evaluate_assert_offset(*x, *y, *tolerance, &host.snapshot())
            }
            ScenarioStep::AssertIndicators { expected } => {
                evaluate_assert_indicators(expected, &host.snapshot())
            }
            ScenarioStep::AssertState { state } => evaluate_assert_state(state, &host.snapshot()),
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!("step {} ({}) failed: {}", step_index, step.name(), message);
            failures.push(StepFailure {
                step_index,
                assertion: step.name().to_string(),
                code,
                message,
            });
        }
    }

    let report = HeadlessReport::new(
        scenario.steps.len(),
        failures,
        elapsed_frames,
        elapsed_ms,
        host.snapshot(),
    );
    if report.is_passed() {
        Ok(RunOutcome::Passed { report })
    } else {
        Ok(RunOutcome::Failed { report })
    }
}

/// Advance the host frame by frame until `wait_ms` has elapsed
fn run_wait(
    host: &mut HeadlessHost,
    runtime_cfg: HeadlessRunConfig,
    wait_ms: u64,
    elapsed_frames: &mut u64,
    elapsed_ms: &mut u64,
) -> Result<()> {
    let frames = HeadlessRuntime::frames_for(wait_ms, runtime_cfg.tick_ms);
    if frames == 0 {
        return Ok(());
    }

    let mut cfg = runtime_cfg;
    cfg.max_frames = frames;
    let mut remaining_ms = wait_ms;
    HeadlessRuntime::run(cfg, |ctx| {
        let step_ms = remaining_ms.min(ctx.frame_ms);
        remaining_ms -= step_ms;
        host.advance(step_ms)?;
        *elapsed_frames = elapsed_frames.saturating_add(1);
        *elapsed_ms = elapsed_ms.saturating_add(step_ms);
        Ok(())
    })
}
