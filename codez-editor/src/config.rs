//! Editor tuning: debounce window, notification lifetime, preview fit margin.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use codez_template::TemplateError;

use crate::error::EditorResult;

/// Quiet period after the last edit before the preview regenerates
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// How long export notifications stay visible
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Fraction of the viewport used when oversized content is scaled down
pub const FIT_MARGIN: f64 = 0.9;

pub const DEBOUNCE_ENV: &str = "CODEZ_DEBOUNCE_MS";
pub const NOTIFICATION_ENV: &str = "CODEZ_NOTIFICATION_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub debounce_ms: u64,
    pub notification_ms: u64,
    pub fit_margin: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_WINDOW.as_millis() as u64,
            notification_ms: NOTIFICATION_TIMEOUT.as_millis() as u64,
            fit_margin: FIT_MARGIN,
        }
    }
}

impl EditorConfig {
    pub fn from_yaml(yaml: &str) -> EditorResult<Self> {
        Ok(serde_yaml::from_str(yaml).map_err(TemplateError::from)?)
    }

    /// Defaults with the process environment applied on top
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `CODEZ_*` overrides read through `lookup`. Unparsable values are
    /// ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = parse_millis(DEBOUNCE_ENV, lookup(DEBOUNCE_ENV)) {
            self.debounce_ms = ms;
        }
        if let Some(ms) = parse_millis(NOTIFICATION_ENV, lookup(NOTIFICATION_ENV)) {
            self.notification_ms = ms;
        }
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

fn parse_millis(name: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring non-numeric override");
            None
        }
    }
}
