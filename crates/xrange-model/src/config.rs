#![forbid(unsafe_code)]

//! Range configuration: bounds, step, and the derived normalized step.
//!
//! A [`RangeConfig`] is validated once and then immutable. Reconfiguring a
//! control means building a whole new config, never patching one field, so
//! `normal_step` can never go stale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound used when the host supplies none.
pub const DEFAULT_MIN: f64 = 0.0;
/// Upper bound used when the host supplies none.
pub const DEFAULT_MAX: f64 = 100.0;
/// Step used when the host supplies none.
pub const DEFAULT_STEP: f64 = 1.0;

/// Validated `{min, max, step}` triple.
///
/// Invariants: all fields finite, `max > min`, `step > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRangeConfig", into = "RawRangeConfig")]
pub struct RangeConfig {
    min: f64,
    max: f64,
    step: f64,
    normal_step: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            normal_step: DEFAULT_STEP / (DEFAULT_MAX - DEFAULT_MIN),
        }
    }
}

impl RangeConfig {
    /// Validate and build a configuration.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, RangeConfigError> {
        for (field, value) in [("min", min), ("max", max), ("step", step)] {
            if !value.is_finite() {
                return Err(RangeConfigError::NonFinite { field, value });
            }
        }
        if max <= min {
            return Err(RangeConfigError::EmptySpan { min, max });
        }
        if step <= 0.0 {
            return Err(RangeConfigError::NonPositiveStep { step });
        }
        let normal_step = step / (max - min);
        // A span near f64::MAX can overflow to infinity.
        if !normal_step.is_finite() || normal_step <= 0.0 {
            return Err(RangeConfigError::EmptySpan { min, max });
        }
        Ok(Self {
            min,
            max,
            step,
            normal_step,
        })
    }

    /// Build from host attributes, falling back to defaults for absent ones.
    pub fn from_attributes(attributes: &RangeAttributes<'_>) -> Result<Self, RangeConfigError> {
        let min = parse_attribute("min", attributes.min, DEFAULT_MIN)?;
        let max = parse_attribute("max", attributes.max, DEFAULT_MAX)?;
        let step = parse_attribute("step", attributes.step, DEFAULT_STEP)?;
        Self::new(min, max, step)
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Domain step.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Step expressed in normalized units, `step / (max - min)`.
    #[must_use]
    pub const fn normal_step(&self) -> f64 {
        self.normal_step
    }

    /// Width of the domain, `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl fmt::Display for RangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {}", self.min, self.max, self.step)
    }
}

/// Unvalidated wire form of [`RangeConfig`]. Missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRangeConfig {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for RawRangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

fn default_min() -> f64 {
    DEFAULT_MIN
}

fn default_max() -> f64 {
    DEFAULT_MAX
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

impl TryFrom<RawRangeConfig> for RangeConfig {
    type Error = RangeConfigError;

    fn try_from(raw: RawRangeConfig) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max, raw.step)
    }
}

impl From<RangeConfig> for RawRangeConfig {
    fn from(config: RangeConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            step: config.step,
        }
    }
}

/// String attributes as a host document would carry them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeAttributes<'a> {
    pub min: Option<&'a str>,
    pub max: Option<&'a str>,
    pub step: Option<&'a str>,
}

impl<'a> RangeAttributes<'a> {
    /// No attributes: every field falls back to its default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: None,
            max: None,
            step: None,
        }
    }

    /// Set the `min` attribute.
    #[must_use]
    pub const fn min(mut self, raw: &'a str) -> Self {
        self.min = Some(raw);
        self
    }

    /// Set the `max` attribute.
    #[must_use]
    pub const fn max(mut self, raw: &'a str) -> Self {
        self.max = Some(raw);
        self
    }

    /// Set the `step` attribute.
    #[must_use]
    pub const fn step(mut self, raw: &'a str) -> Self {
        self.step = Some(raw);
        self
    }

    /// Collect attributes from `(name, value)` pairs, ignoring unknown names.
    /// Later duplicates win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |attrs, (name, value)| match name {
                "min" => attrs.min(value),
                "max" => attrs.max(value),
                "step" => attrs.step(value),
                _ => attrs,
            })
    }
}

fn parse_attribute(
    name: &'static str,
    raw: Option<&str>,
    default: f64,
) -> Result<f64, RangeConfigError> {
    match raw {
        None => Ok(default),
        Some(text) => parse_number(text).ok_or_else(|| RangeConfigError::InvalidAttribute {
            name,
            raw: text.to_string(),
        }),
    }
}

/// Parse a number with document-attribute semantics: surrounding whitespace
/// is ignored, an empty string is zero, `0x`/`0o`/`0b` integer prefixes and
/// signed `Infinity` are accepted, and anything else must be a complete
/// decimal literal.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }
    // `f64::from_str` also takes "inf"/"nan" spellings, which attributes do not.
    let is_decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !is_decimal {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeConfigError {
    /// A bound or the step is NaN or infinite.
    NonFinite { field: &'static str, value: f64 },
    /// `max <= min`: normalization would divide by zero or flip.
    EmptySpan { min: f64, max: f64 },
    /// `step <= 0`.
    NonPositiveStep { step: f64 },
    /// A host attribute is not a number.
    InvalidAttribute { name: &'static str, raw: String },
}

impl fmt::Display for RangeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, value } => {
                write!(f, "range {field} must be finite (got {value})")
            }
            Self::EmptySpan { min, max } => {
                write!(f, "range max must exceed min (got min={min}, max={max})")
            }
            Self::NonPositiveStep { step } => write!(f, "range step must be > 0 (got {step})"),
            Self::InvalidAttribute { name, raw } => {
                write!(f, "attribute {name}={raw:?} is not a number")
            }
        }
    }
}

impl std::error::Error for RangeConfigError {}
