//! Overflow application layer
//!
//! A deterministic, windowless host for [`OverflowContainer`] plus a JSON
//! scenario runner built on it.
//!
//! ```rust
//! use overflow_app::HeadlessHost;
//! use overflow_widgets::OverflowContainer;
//!
//! let mut host = HeadlessHost::new(OverflowContainer::new(), 100.0, 50.0, (300.0, 50.0))?;
//! host.hover("right")?;
//! host.advance(300)?;
//!
//! let snapshot = host.snapshot();
//! assert_eq!(snapshot.scroll_left, 190.0);
//! assert_eq!(snapshot.state, "idle");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [`OverflowContainer`]: overflow_widgets::OverflowContainer

pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod host;

pub use headless_report::{HeadlessReport, ReportStatus, StepFailure};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{Extent, HeadlessScenario, ScenarioStep};
pub use host::{HeadlessHost, HostSnapshot};
