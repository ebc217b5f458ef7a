#![forbid(unsafe_code)]

//! Headless replay harness for xrange.
//!
//! - **Scripts**: JSON documents describing a range configuration, options,
//!   and a sequence of programmatic writes and input events ([`script`]).
//! - **Replay**: drives a [`RangeControl`](xrange_widgets::RangeControl)
//!   through a script and records one `v: <value>, nv: <normal_value>` line
//!   per change notification ([`replay`]).
//! - **Environment**: `XRANGE_HARNESS_*` variables select the script,
//!   override the range, and configure logging ([`config`]).
//!
//! # Quick Start
//!
//! ```
//! use xrange_harness::{replay::replay, script::Script};
//!
//! let report = replay(&Script::demo()).expect("demo replays");
//! assert_eq!(report.lines[0], "v: 512, nv: 0.5");
//! ```

use std::fmt;
use std::io;

use xrange_model::{InvalidValue, RangeConfigError};

pub mod config;
pub mod replay;
pub mod script;

/// Harness failures.
#[derive(Debug)]
pub enum HarnessError {
    /// Reading the script or writing output failed.
    Io(io::Error),
    /// The script is not valid JSON for [`script::Script`].
    Script(serde_json::Error),
    /// The effective range configuration was rejected.
    Config(RangeConfigError),
    /// An environment variable holds an unusable value.
    InvalidEnv { name: &'static str, raw: String },
    /// A scripted write was rejected.
    Value { step: usize, source: InvalidValue },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Script(err) => write!(f, "invalid script: {err}"),
            Self::Config(err) => write!(f, "invalid range: {err}"),
            Self::InvalidEnv { name, raw } => write!(f, "{name}={raw:?} is not a number"),
            Self::Value { step, source } => write!(f, "step {step}: {source}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Script(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Value { source, .. } => Some(source),
            Self::InvalidEnv { .. } => None,
        }
    }
}

impl From<io::Error> for HarnessError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Script(err)
    }
}

impl From<RangeConfigError> for HarnessError {
    fn from(err: RangeConfigError) -> Self {
        Self::Config(err)
    }
}
