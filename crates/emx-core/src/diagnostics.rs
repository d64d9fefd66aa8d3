//! Warning channel for recoverable numerical conditions.
//!
//! Numerical precision problems never abort a diagnostic. They are recorded
//! as `(source, message, priority)` triples and forwarded to `tracing`.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Severity attached to a recorded warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnPriority {
    /// Informational, results are still trustworthy.
    Low,
    /// Results may have lost precision and should be treated with caution.
    Medium,
    /// Results are very likely wrong.
    High,
}

/// One recorded warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Tag naming the routine that raised the warning.
    pub source: String,
    /// Human readable description.
    pub message: String,
    /// Severity of the condition.
    pub priority: WarnPriority,
}

impl Warning {
    /// Creates a new warning record.
    pub fn new(source: impl Into<String>, message: impl Into<String>, priority: WarnPriority) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            priority,
        }
    }
}

/// Destination for warnings raised by host-level diagnostic entry points.
pub trait WarningSink: Send + Sync {
    /// Records a warning.
    fn record(&self, warning: Warning);
}

/// Sink forwarding every warning to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn record(&self, warning: Warning) {
        emit(&warning);
    }
}

fn emit(warning: &Warning) {
    match warning.priority {
        WarnPriority::Low => {
            tracing::info!(source = %warning.source, "{}", warning.message)
        }
        WarnPriority::Medium => {
            tracing::warn!(source = %warning.source, "{}", warning.message)
        }
        WarnPriority::High => {
            tracing::error!(source = %warning.source, "{}", warning.message)
        }
    }
}

/// Sink that keeps every warning in memory and forwards it to `tracing`.
#[derive(Debug, Default)]
pub struct WarningLog {
    entries: Mutex<Vec<Warning>>,
}

impl WarningLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded warnings in arrival order.
    pub fn entries(&self) -> Vec<Warning> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of warnings recorded so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true when a warning from `source` was recorded.
    pub fn contains_source(&self, source: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|warning| warning.source == source)
    }
}

impl WarningSink for WarningLog {
    fn record(&self, warning: Warning) {
        emit(&warning);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning);
    }
}
