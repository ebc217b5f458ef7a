#![forbid(unsafe_code)]

//! Host-agnostic range model: validated configuration plus the
//! value/normalized-value pair kept consistent under every write.

pub mod config;
pub mod value;

pub use config::{RangeAttributes, RangeConfig, RangeConfigError, RawRangeConfig};
pub use value::{InvalidValue, PositionHook, ValueInput, ValueModel, ValueState, ValueUpdate};
