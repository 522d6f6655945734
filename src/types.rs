// Strong typing over strings. Newtypes for clock time and progress, config passed from JS.
// See DESIGN.md: types.rs

use serde::{Deserialize, Serialize};

use crate::catalog::{default_log_messages, default_sample_urls};
use crate::error::WidgetError;

/// Host clock time in milliseconds since the controller was created. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Millis(u64);

impl Millis {
    pub fn new(ms: u64) -> Self {
        Millis(ms)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, ms: u64) -> Self {
        Millis(self.0.saturating_add(ms))
    }
}

/// Generation progress in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Progress(u8);

impl Progress {
    pub const MAX: Progress = Progress(100);

    pub fn new(percent: u8) -> Self {
        Progress(percent.min(100))
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }

    /// One step forward, pinned at 100.
    pub fn advanced(self) -> Self {
        Progress::new(self.0.saturating_add(1))
    }
}

/// Run status. Edges: Idle -> InProgress -> Completed -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    InProgress,
    Completed,
}

/// What `start()` does while a run is already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartPolicy {
    /// Re-entrant starts are dropped; the current run continues untouched.
    #[default]
    Ignore,
    /// Cancel both timers, then begin a fresh run from 0.
    Restart,
}

/// Widget configuration passed from JS. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Period of the repeating tick timer.
    #[serde(default = "default_tick_period")]
    pub tick_period_ms: u64,
    /// Pause between reaching 100% and the Completed status.
    #[serde(default = "default_completion_delay")]
    pub completion_delay_ms: u64,
    #[serde(default)]
    pub restart_policy: RestartPolicy,
    #[serde(default = "default_log_messages")]
    pub log_catalog: Vec<String>,
    #[serde(default = "default_sample_urls")]
    pub samples: Vec<String>,
}

fn default_tick_period() -> u64 {
    50
}

fn default_completion_delay() -> u64 {
    500
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            tick_period_ms: default_tick_period(),
            completion_delay_ms: default_completion_delay(),
            restart_policy: RestartPolicy::default(),
            log_catalog: default_log_messages(),
            samples: default_sample_urls(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let config: WidgetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.tick_period_ms == 0 {
            return Err(WidgetError::InvalidConfig(
                "tick_period_ms must be positive".to_string(),
            ));
        }
        if self.log_catalog.is_empty() {
            return Err(WidgetError::InvalidConfig(
                "log_catalog must contain at least one message".to_string(),
            ));
        }
        if self.samples.is_empty() {
            return Err(WidgetError::InvalidConfig(
                "samples must contain at least one video url".to_string(),
            ));
        }
        Ok(())
    }
}

/// Controller state handed to the shell for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GenerationStatus,
    pub progress: Progress,
    pub logs: Vec<String>,
    /// Bumped on every observable mutation.
    pub revision: u64,
    pub completion_pending: bool,
}
