//! Headless runtime primitives for scenario execution.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Time covered by this frame.
    pub frame_ms: u64,
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget, stopping at the first frame that fails.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext) -> Result<()>,
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..cfg.max_frames {
            on_frame(&HeadlessContext {
                frame_index: frame,
                frame_ms: cfg.tick_ms,
            })?;
        }

        Ok(())
    }

    /// Frames needed to cover `wait_ms` at `tick_ms` per frame.
    ///
    /// A zero `tick_ms` covers nothing; [`run`](Self::run) rejects it.
    pub fn frames_for(wait_ms: u64, tick_ms: u64) -> u32 {
        if wait_ms == 0 || tick_ms == 0 {
            return 0;
        }
        wait_ms.div_ceil(tick_ms).min(u32::MAX as u64) as u32
    }
}
