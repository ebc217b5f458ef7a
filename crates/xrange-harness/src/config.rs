#![forbid(unsafe_code)]

//! Harness configuration from `XRANGE_HARNESS_*` environment variables.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `XRANGE_HARNESS_SCRIPT` | Path to a JSON script (else the first CLI argument, else the demo) |
//! | `XRANGE_HARNESS_MIN` / `_MAX` / `_STEP` | Override the script's range |
//! | `XRANGE_HARNESS_LOG` | `EnvFilter` directives; logging is off when unset |
//! | `XRANGE_HARNESS_LOG_JSON` | `1`/`true`/`yes`/`on` for JSON log lines |
//!
//! Variables are read through a lookup function so tests can supply their
//! own environment.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use xrange_model::RangeConfig;
use xrange_model::config::parse_number;

use crate::HarnessError;

pub const ENV_SCRIPT: &str = "XRANGE_HARNESS_SCRIPT";
pub const ENV_MIN: &str = "XRANGE_HARNESS_MIN";
pub const ENV_MAX: &str = "XRANGE_HARNESS_MAX";
pub const ENV_STEP: &str = "XRANGE_HARNESS_STEP";
pub const ENV_LOG: &str = "XRANGE_HARNESS_LOG";
pub const ENV_LOG_JSON: &str = "XRANGE_HARNESS_LOG_JSON";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    /// Filter directives; `None` disables logging.
    pub filter: Option<String>,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

/// Range overrides; `None` keeps the script's value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeOverrides {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl RangeOverrides {
    /// Whether any field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.step.is_none()
    }

    /// Apply to `base`, revalidating the result.
    pub fn apply(&self, base: RangeConfig) -> Result<RangeConfig, HarnessError> {
        if self.is_empty() {
            return Ok(base);
        }
        Ok(RangeConfig::new(
            self.min.unwrap_or(base.min()),
            self.max.unwrap_or(base.max()),
            self.step.unwrap_or(base.step()),
        )?)
    }
}

/// Everything the harness binary reads from its environment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HarnessConfig {
    pub script: Option<PathBuf>,
    pub overrides: RangeOverrides,
    pub log: LogSettings,
}

impl HarnessConfig {
    /// Read the process environment. `arg` is the first CLI argument.
    pub fn from_env(arg: Option<String>) -> Result<Self, HarnessError> {
        Self::from_lookup(|name| std::env::var(name).ok(), arg)
    }

    /// Read configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F, arg: Option<String>) -> Result<Self, HarnessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };
        let number = |name: &'static str| -> Result<Option<f64>, HarnessError> {
            var(name)
                .map(|raw| parse_number(&raw).ok_or(HarnessError::InvalidEnv { name, raw }))
                .transpose()
        };

        let script = var(ENV_SCRIPT)
            .or(arg.filter(|a| !a.trim().is_empty()))
            .map(PathBuf::from);
        let overrides = RangeOverrides {
            min: number(ENV_MIN)?,
            max: number(ENV_MAX)?,
            step: number(ENV_STEP)?,
        };
        let log = LogSettings {
            filter: var(ENV_LOG),
            json: var(ENV_LOG_JSON).is_some_and(|v| {
                matches!(
                    v.to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            }),
        };
        Ok(Self {
            script,
            overrides,
            log,
        })
    }
}

/// Install a global subscriber writing to stderr.
///
/// Returns `false` when logging is disabled or a subscriber already exists.
pub fn init_logging(settings: &LogSettings) -> bool {
    let Some(directives) = settings.filter.as_deref() else {
        return false;
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr);
    if settings.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
