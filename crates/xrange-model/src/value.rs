#![forbid(unsafe_code)]

//! Dual-representation value model.
//!
//! The model stores one [`ValueState`] holding both the domain value and the
//! normalized value. Every write goes through [`ValueModel::apply`], which
//! takes a tagged [`ValueInput`] naming the driving representation, resolves
//! the other one, and replaces the whole state at once. There is no code path
//! that writes one field without the other.
//!
//! ```text
//! Domain(v)      clamp(v, min, max) -> quantize(step)        -> value
//!                                      map_range -> [0, 1]   -> normal_value
//! Normalized(v)  clamp(v, 0, 1)     -> quantize(normal_step) -> normal_value
//!                                      map_range -> quantize -> value
//! ```
//!
//! After each accepted write the position hook (if any) is called with the
//! new state, so a renderer can redraw without polling.

use std::fmt;

use serde::{Deserialize, Serialize};
use xrange_core::numeric::{clamp, clamp_unit, map_range, quantize};

use crate::config::RangeConfig;

/// Consistent `{value, normal_value}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueState {
    /// Domain value, quantized to `step`.
    pub value: f64,
    /// Normalized value in `[0, 1]`, quantized to `normal_step`.
    pub normal_value: f64,
}

impl ValueState {
    /// Resolve `input` against `config` into a full state.
    ///
    /// Callers must reject NaN first; see [`ValueModel::apply`].
    #[must_use]
    pub fn resolve(config: &RangeConfig, input: ValueInput) -> Self {
        let (min, max) = (config.min(), config.max());
        match input {
            ValueInput::Domain(raw) => {
                let value = quantize(clamp(raw, min, max), config.step());
                // The step grid is anchored at zero, so a quantized value can
                // sit below `min` when `min` is off-grid.
                let normal_value = clamp_unit(map_range(value, min, max, 0.0, 1.0));
                Self {
                    value,
                    normal_value,
                }
            }
            ValueInput::Normalized(raw) => {
                let clamped = clamp_unit(raw);
                let normal_value = clamp_unit(quantize(clamped, config.normal_step()));
                // `min + span` can land an ulp past `max`.
                let mapped = clamp(map_range(clamped, 0.0, 1.0, min, max), min, max);
                let value = quantize(mapped, config.step());
                Self {
                    value,
                    normal_value,
                }
            }
        }
    }
}

/// A write to the model, tagged with the representation that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueInput {
    /// A value in domain units (`min..max`).
    Domain(f64),
    /// A value in normalized units (`0..1`).
    Normalized(f64),
}

impl ValueInput {
    /// The raw number carried by the input.
    #[must_use]
    pub const fn raw(self) -> f64 {
        match self {
            Self::Domain(v) | Self::Normalized(v) => v,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Domain(_) => "value",
            Self::Normalized(_) => "normal value",
        }
    }
}

/// Before/after pair returned by every accepted write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueUpdate {
    pub previous: ValueState,
    pub current: ValueState,
}

impl ValueUpdate {
    /// Whether the quantized state differs from before the write.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// A NaN was written to the model. The state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidValue {
    pub input: ValueInput,
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be a number (got NaN)", self.input.label())
    }
}

impl std::error::Error for InvalidValue {}

/// Callback fired after every accepted write.
pub type PositionHook = Box<dyn FnMut(&ValueState)>;

/// Owner of the range configuration and the value state.
pub struct ValueModel {
    config: RangeConfig,
    state: ValueState,
    position_hook: Option<PositionHook>,
}

impl fmt::Debug for ValueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueModel")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("position_hook", &self.position_hook.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for ValueModel {
    fn default() -> Self {
        Self::new(RangeConfig::default())
    }
}

impl ValueModel {
    /// Create a model sitting at `config.min()` (quantized).
    #[must_use]
    pub fn new(config: RangeConfig) -> Self {
        Self {
            config,
            state: ValueState::resolve(&config, ValueInput::Domain(config.min())),
            position_hook: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &RangeConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ValueState {
        self.state
    }

    /// Domain value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.state.value
    }

    /// Normalized value.
    #[must_use]
    pub const fn normal_value(&self) -> f64 {
        self.state.normal_value
    }

    /// Register the position-changed hook, replacing any previous one.
    pub fn set_position_hook(&mut self, hook: impl FnMut(&ValueState) + 'static) {
        self.position_hook = Some(Box::new(hook));
    }

    /// Remove the position-changed hook.
    pub fn clear_position_hook(&mut self) {
        self.position_hook = None;
    }

    /// Replace the configuration and re-apply the current value against it.
    ///
    /// The value is re-clamped and re-quantized so the state always honours
    /// the new bounds. The position hook fires; no change notification is
    /// implied.
    pub fn configure(&mut self, config: RangeConfig) -> ValueUpdate {
        xrange_core::debug!(
            min = config.min(),
            max = config.max(),
            step = config.step(),
            "range reconfigured"
        );
        self.config = config;
        self.commit(ValueInput::Domain(self.state.value))
    }

    /// Set the domain value.
    pub fn set_value(&mut self, value: f64) -> Result<ValueUpdate, InvalidValue> {
        self.apply(ValueInput::Domain(value))
    }

    /// Set the normalized value.
    pub fn set_normal_value(&mut self, normal_value: f64) -> Result<ValueUpdate, InvalidValue> {
        self.apply(ValueInput::Normalized(normal_value))
    }

    /// Move the domain value by `steps` whole steps (negative moves down).
    pub fn step_by(&mut self, steps: i32) -> Result<ValueUpdate, InvalidValue> {
        let target = self.state.value + f64::from(steps) * self.config.step();
        self.set_value(target)
    }

    /// Quantized normalized value a raw track fraction would produce,
    /// without writing it.
    #[must_use]
    pub fn snap_normal(&self, fraction: f64) -> f64 {
        ValueState::resolve(&self.config, ValueInput::Normalized(fraction)).normal_value
    }

    /// Write `input`, the single path every setter goes through.
    ///
    /// NaN is rejected. Infinities are ordered and clamp like any other
    /// out-of-range input.
    pub fn apply(&mut self, input: ValueInput) -> Result<ValueUpdate, InvalidValue> {
        if input.raw().is_nan() {
            xrange_core::warn!(?input, "rejected NaN value input");
            return Err(InvalidValue { input });
        }
        Ok(self.commit(input))
    }

    fn commit(&mut self, input: ValueInput) -> ValueUpdate {
        let previous = self.state;
        self.state = ValueState::resolve(&self.config, input);
        xrange_core::trace!(
            ?input,
            value = self.state.value,
            normal_value = self.state.normal_value,
            "value state resolved"
        );
        if let Some(hook) = self.position_hook.as_mut() {
            hook(&self.state);
        }
        ValueUpdate {
            previous,
            current: self.state,
        }
    }
}
