#![forbid(unsafe_code)]

//! Script replay.

use std::cell::Cell;
use std::rc::Rc;

use xrange_model::ValueState;
use xrange_widgets::marker::format_label;
use xrange_widgets::{RangeControl, RangeTransition};

use crate::HarnessError;
use crate::script::{Script, ScriptStep};

/// Outcome of one replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// One `v: .., nv: ..` line per change notification.
    pub lines: Vec<String>,
    /// Every controller transition, in order.
    pub transitions: Vec<RangeTransition>,
    /// State after the last step.
    pub final_state: ValueState,
}

/// Log line for a change notification.
#[must_use]
pub fn format_line(state: ValueState) -> String {
    format!(
        "v: {}, nv: {}",
        format_label(state.value),
        format_label(state.normal_value)
    )
}

/// Run `script` against a fresh control.
pub fn replay(script: &Script) -> Result<ReplayReport, HarnessError> {
    let mut control = RangeControl::with_options(script.config, script.options);
    let heard = Rc::new(Cell::new(0usize));
    let sink = Rc::clone(&heard);
    control.add_change_listener(move |_| sink.set(sink.get() + 1));

    let mut lines = Vec::new();
    let mut transitions = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        let before = heard.get();
        match step {
            ScriptStep::Configure { config } => {
                control.configure(*config);
            }
            ScriptStep::SetValue { value } => {
                control
                    .set_value(*value)
                    .map_err(|source| HarnessError::Value {
                        step: index,
                        source,
                    })?;
            }
            ScriptStep::SetNormalValue { value } => {
                control
                    .set_normal_value(*value)
                    .map_err(|source| HarnessError::Value {
                        step: index,
                        source,
                    })?;
            }
            ScriptStep::Event { event } => transitions.push(control.handle_event(event)),
        }
        for _ in before..heard.get() {
            lines.push(format_line(control.state()));
        }
    }

    tracing::info!(
        steps = script.steps.len(),
        notifications = lines.len(),
        "replay finished"
    );
    Ok(ReplayReport {
        lines,
        transitions,
        final_state: control.state(),
    })
}
