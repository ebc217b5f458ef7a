#![forbid(unsafe_code)]

//! xrange public facade crate.
//!
//! Re-exports the value model, the interaction controller, and the input
//! types hosts feed it, plus a small prelude for day-to-day usage.
//!
//! ```
//! use xrange::prelude::*;
//!
//! let mut slider = RangeControl::new(RangeConfig::new(0.0, 1024.0, 1.0)?);
//! slider.set_normal_value(0.25)?;
//! assert_eq!(slider.value(), 256.0);
//! # Ok::<(), xrange::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use xrange_core::event::{
    Event, FocusTarget, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind, PointerId, TextInputEvent,
};
pub use xrange_core::geometry::TrackBounds;
pub use xrange_core::numeric::{clamp, clamp_unit, map_range, quantize};

// --- Model re-exports ------------------------------------------------------

pub use xrange_model::{
    InvalidValue, RangeAttributes, RangeConfig, RangeConfigError, ValueInput, ValueModel,
    ValueState, ValueUpdate,
};

// --- Widget re-exports -----------------------------------------------------

pub use xrange_widgets::{
    CaptureCommand, ChangeNotification, DragPhase, DragSubscription, ListenerId, MarkerLayout,
    NotifyPolicy, RangeControl, RangeEffect, RangeNoopReason, RangeOptions, RangeTransition,
    ReleaseReason,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for xrange hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The range configuration was rejected.
    Config(RangeConfigError),
    /// A NaN was written to the value model.
    Value(InvalidValue),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Value(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Value(err) => Some(err),
        }
    }
}

impl From<RangeConfigError> for Error {
    fn from(err: RangeConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<InvalidValue> for Error {
    fn from(err: InvalidValue) -> Self {
        Self::Value(err)
    }
}

/// Standard result type for xrange APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Event, FocusTarget, KeyCode, KeyEvent, MarkerLayout, PointerEvent, PointerId,
        RangeConfig, RangeControl, RangeOptions, RangeTransition, Result, TrackBounds,
        ValueState,
    };

    pub use crate::{core, model, widgets};
}

pub use xrange_core as core;
pub use xrange_model as model;
pub use xrange_widgets as widgets;
