#![forbid(unsafe_code)]

//! Replay scripts.
//!
//! ```json
//! {
//!   "config": { "min": 0, "max": 1024, "step": 1 },
//!   "options": { "text_edit": true },
//!   "steps": [
//!     { "op": "set_normal_value", "value": 0.25 },
//!     { "op": "event", "event": { "event": "key", "key": { "code": "right" } } }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use xrange_core::event::{
    Event, FocusTarget, KeyCode, KeyEvent, PointerEvent, PointerId, TextInputEvent,
};
use xrange_core::geometry::TrackBounds;
use xrange_model::RangeConfig;
use xrange_widgets::RangeOptions;

use crate::HarnessError;

/// A scripted session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: RangeConfig,
    #[serde(default)]
    pub options: RangeOptions,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Replace the range configuration.
    Configure { config: RangeConfig },
    /// Programmatic domain-value write.
    SetValue { value: f64 },
    /// Programmatic normalized-value write.
    SetNormalValue { value: f64 },
    /// Deliver an input event.
    Event { event: Event },
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Replace the configuration the session starts from.
    #[must_use]
    pub fn with_config(mut self, config: RangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Built-in demo: a `0..1024` slider set to a quarter, then dragged,
    /// stepped with both key bindings, and edited through the label.
    #[must_use]
    pub fn demo() -> Self {
        let track = TrackBounds::new(0.0, 400.0);
        let pointer = PointerId(1);
        let config = match RangeConfig::new(0.0, 1024.0, 1.0) {
            Ok(config) => config,
            Err(_) => RangeConfig::default(),
        };
        let event = |event: Event| ScriptStep::Event { event };
        Self {
            config,
            options: RangeOptions::new().with_text_edit(true),
            steps: vec![
                ScriptStep::SetNormalValue { value: 0.25 },
                event(Event::Pointer(PointerEvent::down(pointer, 200.0, track))),
                event(Event::Pointer(PointerEvent::moved(pointer, 300.0, track))),
                event(Event::Pointer(PointerEvent::moved(pointer, 300.1, track))),
                event(Event::Pointer(PointerEvent::up(pointer, 300.1, track))),
                event(Event::Key {
                    key: KeyEvent::new(KeyCode::Right),
                    focus: FocusTarget::Control,
                }),
                event(Event::Key {
                    key: KeyEvent::new(KeyCode::Up),
                    focus: FocusTarget::ValueLabel,
                }),
                event(Event::TextInput(TextInputEvent::new("12."))),
                event(Event::TextInput(TextInputEvent::new("12.5"))),
            ],
        }
    }
}
