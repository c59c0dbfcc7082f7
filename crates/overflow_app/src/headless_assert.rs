//! Assertion helpers for headless scenario steps.

use crate::host::HostSnapshot;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_offset(
    x: Option<f32>,
    y: Option<f32>,
    tolerance: f32,
    snapshot: &HostSnapshot,
) -> AssertionResult {
    let checks = [
        ("scroll_left", x, snapshot.scroll_left),
        ("scroll_top", y, snapshot.scroll_top),
    ];
    for (axis, expected, actual) in checks {
        let Some(expected) = expected else {
            continue;
        };
        if (actual - expected).abs() > tolerance {
            return AssertionResult::failed(
                "offset_mismatch",
                format!("{axis}: expected {expected} (±{tolerance}), got {actual}"),
            );
        }
    }
    AssertionResult::Passed
}

pub fn evaluate_assert_indicators(expected: &[String], snapshot: &HostSnapshot) -> AssertionResult {
    let mut want: Vec<&str> = expected.iter().map(String::as_str).collect();
    let mut got: Vec<&str> = snapshot.indicators.iter().map(String::as_str).collect();
    want.sort_unstable();
    got.sort_unstable();

    if want == got {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "indicator_mismatch",
            format!("expected indicators {want:?}, got {got:?}"),
        )
    }
}

pub fn evaluate_assert_state(expected: &str, snapshot: &HostSnapshot) -> AssertionResult {
    if snapshot.state == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "state_mismatch",
            format!("expected state '{expected}', got '{}'", snapshot.state),
        )
    }
}
