//! Progress events and the context keys that back them
//!
//! A progress counter named `job` lives entirely in context data:
//!
//! | key         | value                                              |
//! |-------------|----------------------------------------------------|
//! | `job`       | iteration count                                    |
//! | `job_timer` | start timestamp, replaced by `"<secs> secs"` at finish |
//! | `job_total` | optional target count used for percentages         |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Every this many iterations a progress line is promoted from debug to info
pub const INFO_EVERY: i64 = 1000;

static EVENT_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_(start|iteration|finish)$").expect("event method pattern is valid"));

/// Lifecycle event of a progress counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressEvent {
    Start,
    Iteration,
    Finish,
}

impl ProgressEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressEvent::Start => "start",
            ProgressEvent::Iteration => "iteration",
            ProgressEvent::Finish => "finish",
        }
    }

    /// Split an event method name like `job_start` into `("job", Start)`
    pub fn parse_method(method: &str) -> Option<(&str, ProgressEvent)> {
        let caps = EVENT_METHOD.captures(method)?;
        let name = caps.get(1)?.as_str();
        let event = match caps.get(2)?.as_str() {
            "start" => ProgressEvent::Start,
            "iteration" => ProgressEvent::Iteration,
            "finish" => ProgressEvent::Finish,
            _ => return None,
        };
        Some((name, event))
    }

    /// The line logged for this event, e.g. `job_iteration`
    pub fn line(&self, name: &str) -> String {
        format!("{}_{}", name, self.as_str())
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn timer_key(name: &str) -> String {
    format!("{}_timer", name)
}

pub(crate) fn total_key(name: &str) -> String {
    format!("{}_total", name)
}

/// Percentage of `count` over `total`; a zero total gives an infinite or NaN result
pub(crate) fn percent(count: i64, total: f64) -> f64 {
    count as f64 * 100.0 / total
}

/// Render a float for a progress line
///
/// Always carries a decimal point, including in exponent form (`4.0e-5`).
/// Non-finite values render as `Infinity`, `-Infinity` and `NaN`.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !mantissa.contains('.') => format!("{}.0e{}", mantissa, exp),
        _ => text,
    }
}
