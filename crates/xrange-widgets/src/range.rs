#![forbid(unsafe_code)]

//! Range-slider interaction controller.
//!
//! [`RangeControl`] owns a [`ValueModel`] and turns canonical input events
//! into value writes, drag lifecycle changes, and change notifications.
//!
//! ```text
//! Idle --pointer down--> Dragging --pointer up / cancel / lost capture / blur--> Idle
//!                         |    ^
//!                         +----+  pointer move (same pointer), re-press (same pointer)
//! ```
//!
//! Every handled event yields one [`RangeTransition`] with a monotonically
//! increasing `transition_id`, the phase before and after, the effect, the
//! pointer-capture command the host should apply, and whether listeners were
//! notified. Ignored input is reported through [`RangeEffect::Noop`] with an
//! explicit [`RangeNoopReason`] instead of being dropped silently.
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists; its pointer is the only pointer
//!    whose move/up events are honoured.
//! 2. Pointer input notifies only when the quantized normalized value moved.
//! 3. Keyboard and text input notify according to [`NotifyPolicy`].
//! 4. Keyboard input never starts or ends a drag.
//! 5. Programmatic writes and [`RangeControl::configure`] never notify.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Unmappable pointer position | Zero-width or non-finite track bounds | Value untouched, lifecycle still advances |
//! | Unparseable label text | No leading number | Ignored, no notification |
//! | Mid-typing label text | Trailing decimal point | Ignored until the next edit |
//! | Second pointer pressed mid-drag | Multi-touch | Ignored |
//! | Secondary or middle button press | Context menu, paste | Ignored, no session |
//! | Arrow key with Ctrl/Alt/Super | Host shortcut | Ignored, not consumed |

use std::fmt;

use serde::{Deserialize, Serialize};
use xrange_core::event::{
    Event, FocusTarget, KeyCode, KeyEvent, PointerEvent, PointerEventKind, PointerId,
};
use xrange_model::{
    InvalidValue, RangeAttributes, RangeConfig, RangeConfigError, ValueInput, ValueModel,
    ValueState, ValueUpdate,
};

use crate::drag::{DragSession, DragSubscription, ReleaseReason};
use crate::marker::MarkerLayout;
use crate::text_edit::{is_mid_typing, parse_leading_float};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// When keyboard and text-edit input notify change listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Only when the quantized state changed.
    #[default]
    OnChange,
    /// On every accepted key step or committed edit, even at the bounds.
    Always,
}

impl NotifyPolicy {
    const fn should_notify(self, changed: bool) -> bool {
        matches!(self, Self::Always) || changed
    }
}

/// Construction-time behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Enable the inline, editable value label.
    pub text_edit: bool,
    /// Notification policy for keyboard and text-edit input.
    pub notify_policy: NotifyPolicy,
}

impl RangeOptions {
    /// Defaults: no text edit, notify on change.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text_edit: false,
            notify_policy: NotifyPolicy::OnChange,
        }
    }

    /// Enable or disable the inline value label.
    #[must_use]
    pub const fn with_text_edit(mut self, enabled: bool) -> Self {
        self.text_edit = enabled;
        self
    }

    /// Set the notification policy for discrete input.
    #[must_use]
    pub const fn with_notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notify_policy = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// Transition telemetry
// ---------------------------------------------------------------------------

/// Drag lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        pointer_id: PointerId,
    },
}

impl DragPhase {
    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Pointer-capture request for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "pointer_id", rename_all = "snake_case")]
pub enum CaptureCommand {
    /// Route all further events of this pointer to the control.
    Capture(PointerId),
    /// Stop routing this pointer to the control.
    Release(PointerId),
}

/// Why an event left the control untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    NonPrimaryButton,
    PointerMismatch,
    UnmappableGeometry,
    PositionUnchanged,
    KeyReleased,
    ShortcutChord,
    UnboundKey,
    TextEditDisabled,
    MidTyping,
    Unparseable,
    RejectedValue,
}

/// Effect of one handled event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum RangeEffect {
    /// A drag session opened. `normal_value` is `None` when the press
    /// position could not be mapped onto the track.
    DragStarted {
        pointer_id: PointerId,
        normal_value: Option<f64>,
        restarted: bool,
    },
    /// The dragged position moved to a new quantized value.
    DragUpdated {
        pointer_id: PointerId,
        normal_value: f64,
    },
    /// The drag session ended.
    DragEnded {
        pointer_id: PointerId,
        reason: ReleaseReason,
    },
    /// A key stepped the value. `consumed` asks the host to suppress the
    /// key's default action.
    KeyStepped {
        steps: i32,
        focus: FocusTarget,
        consumed: bool,
    },
    /// The inline label's text was parsed and written.
    TextCommitted { parsed: f64 },
    Noop { reason: RangeNoopReason },
}

/// One controller transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: RangeEffect,
    pub capture: Option<CaptureCommand>,
    /// Whether change listeners were notified.
    pub notified: bool,
    /// Value state after the transition.
    pub state: ValueState,
}

impl RangeTransition {
    /// Whether the event was ignored.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, RangeEffect::Noop { .. })
    }

    /// Whether the host should suppress the event's default action.
    #[must_use]
    pub const fn consumed(&self) -> bool {
        matches!(self.effect, RangeEffect::KeyStepped { consumed: true, .. })
    }

    /// The no-op reason, if the event was ignored.
    #[must_use]
    pub const fn noop_reason(&self) -> Option<RangeNoopReason> {
        match self.effect {
            RangeEffect::Noop { reason } => Some(reason),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

/// Fire-and-forget change event. Carries no value.
///
/// Listeners run inside the handler call, while the [`RangeControl`] is
/// still mutably borrowed, so they cannot read the control. The new state
/// is in [`RangeTransition::state`] once the handler returns, and the
/// position hook receives it synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotification {
    /// Whether the event propagates to the host's ancestors.
    pub bubbles: bool,
}

impl ChangeNotification {
    /// Event name.
    pub const NAME: &'static str = "change";

    /// Event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }
}

const CHANGE: ChangeNotification = ChangeNotification { bubbles: true };

/// Handle returned by [`RangeControl::add_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Change listener callback.
pub type ChangeListener = Box<dyn FnMut(&ChangeNotification)>;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

struct Step {
    effect: RangeEffect,
    capture: Option<CaptureCommand>,
    notify: bool,
}

impl Step {
    const fn new(effect: RangeEffect) -> Self {
        Self {
            effect,
            capture: None,
            notify: false,
        }
    }

    const fn noop(reason: RangeNoopReason) -> Self {
        Self::new(RangeEffect::Noop { reason })
    }

    const fn capture(mut self, command: CaptureCommand) -> Self {
        self.capture = Some(command);
        self
    }

    const fn notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}

/// Interactive range slider: value model, drag lifecycle, and listeners.
pub struct RangeControl {
    model: ValueModel,
    options: RangeOptions,
    session: Option<DragSession>,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener_id: u64,
    transition_counter: u64,
}

impl fmt::Debug for RangeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeControl")
            .field("model", &self.model)
            .field("options", &self.options)
            .field("phase", &self.phase())
            .field("listeners", &self.listeners.len())
            .field("transition_counter", &self.transition_counter)
            .finish()
    }
}

impl Default for RangeControl {
    fn default() -> Self {
        Self::new(RangeConfig::default())
    }
}

impl RangeControl {
    /// Create a control with default options.
    #[must_use]
    pub fn new(config: RangeConfig) -> Self {
        Self::with_options(config, RangeOptions::default())
    }

    /// Create a control with explicit options.
    #[must_use]
    pub fn with_options(config: RangeConfig, options: RangeOptions) -> Self {
        Self {
            model: ValueModel::new(config),
            options,
            session: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            transition_counter: 0,
        }
    }

    /// Create a control from host string attributes.
    pub fn from_attributes(
        attributes: &RangeAttributes<'_>,
        options: RangeOptions,
    ) -> Result<Self, RangeConfigError> {
        Ok(Self::with_options(
            RangeConfig::from_attributes(attributes)?,
            options,
        ))
    }

    // --- accessors ---------------------------------------------------------

    /// The underlying value model.
    #[must_use]
    pub const fn model(&self) -> &ValueModel {
        &self.model
    }

    #[must_use]
    pub const fn options(&self) -> RangeOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RangeOptions) {
        self.options = options;
    }

    #[must_use]
    pub const fn config(&self) -> &RangeConfig {
        self.model.config()
    }

    #[must_use]
    pub const fn state(&self) -> ValueState {
        self.model.state()
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.model.value()
    }

    #[must_use]
    pub const fn normal_value(&self) -> f64 {
        self.model.normal_value()
    }

    /// Current drag phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            Some(session) => DragPhase::Dragging {
                pointer_id: session.pointer_id(),
            },
            None => DragPhase::Idle,
        }
    }

    /// Subscription handle for the active drag, if any.
    #[must_use]
    pub fn drag_subscription(&self) -> Option<DragSubscription> {
        self.session.as_ref().map(DragSession::subscribe)
    }

    /// Marker layout for the current state on a track `track_width` wide.
    #[must_use]
    pub fn marker_layout(&self, track_width: f64) -> MarkerLayout {
        MarkerLayout::new(self.model.state(), track_width)
    }

    // --- programmatic API --------------------------------------------------

    /// Replace the range configuration. Never notifies.
    pub fn configure(&mut self, config: RangeConfig) -> ValueUpdate {
        self.model.configure(config)
    }

    /// Set the domain value. Never notifies.
    pub fn set_value(&mut self, value: f64) -> Result<ValueUpdate, InvalidValue> {
        self.model.set_value(value)
    }

    /// Set the normalized value. Never notifies.
    pub fn set_normal_value(&mut self, normal_value: f64) -> Result<ValueUpdate, InvalidValue> {
        self.model.set_normal_value(normal_value)
    }

    /// Register the renderer's position-changed hook.
    pub fn set_position_hook(&mut self, hook: impl FnMut(&ValueState) + 'static) {
        self.model.set_position_hook(hook);
    }

    pub fn clear_position_hook(&mut self) {
        self.model.clear_position_hook();
    }

    /// Register a change listener.
    ///
    /// The listener is called before the handler returns and cannot borrow
    /// this control. Read the value from the returned [`RangeTransition`]
    /// or from [`RangeControl::set_position_hook`].
    pub fn add_change_listener(
        &mut self,
        listener: impl FnMut(&ChangeNotification) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a change listener. Returns `false` if it was not registered.
    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // --- event handling ----------------------------------------------------

    /// Dispatch one canonical event.
    pub fn handle_event(&mut self, event: &Event) -> RangeTransition {
        match event {
            Event::Pointer(pointer) => self.handle_pointer(pointer),
            Event::Key { key, focus } => self.handle_key(*key, *focus),
            Event::TextInput(input) => self.handle_text_input(&input.text),
            Event::Blur => self.handle_blur(),
        }
    }

    /// Handle a pointer event measured against its own track bounds.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> RangeTransition {
        let _span = xrange_core::debug_span!(
            "range.pointer",
            kind = ?event.kind,
            pointer_id = event.pointer_id.get()
        )
        .entered();
        let from = self.phase();
        let step = self.pointer_step(event);
        self.finish(from, step)
    }

    /// Handle a key press delivered with the focused part of the control.
    pub fn handle_key(&mut self, key: KeyEvent, focus: FocusTarget) -> RangeTransition {
        let _span = xrange_core::debug_span!("range.key", code = ?key.code, focus = ?focus).entered();
        let from = self.phase();
        let step = self.key_step(key, focus);
        self.finish(from, step)
    }

    /// Handle an edit of the inline value label.
    pub fn handle_text_input(&mut self, text: &str) -> RangeTransition {
        let _span = xrange_core::debug_span!("range.text_input", len = text.len()).entered();
        let from = self.phase();
        let step = self.text_step(text);
        self.finish(from, step)
    }

    /// Handle loss of focus. Ends an active drag.
    pub fn handle_blur(&mut self) -> RangeTransition {
        let _span = xrange_core::debug_span!("range.blur").entered();
        let from = self.phase();
        let step = self.release_step(ReleaseReason::Blur);
        self.finish(from, step)
    }

    fn pointer_step(&mut self, event: &PointerEvent) -> Step {
        if event.kind == PointerEventKind::Down && !event.is_primary_press() {
            return Step::noop(RangeNoopReason::NonPrimaryButton);
        }
        let owned = self
            .session
            .as_ref()
            .map(|session| session.owns(event.pointer_id));
        match (owned, event.kind) {
            (None, PointerEventKind::Down) => self.begin_drag(event, false),
            (None, _) => Step::noop(RangeNoopReason::IdleWithoutActiveDrag),
            (Some(false), PointerEventKind::Down) => {
                Step::noop(RangeNoopReason::ActiveDragAlreadyInProgress)
            }
            (Some(false), _) => Step::noop(RangeNoopReason::PointerMismatch),
            (Some(true), PointerEventKind::Down) => {
                self.end_drag();
                self.begin_drag(event, true)
            }
            (Some(true), PointerEventKind::Move) => self.track_pointer(event),
            (Some(true), PointerEventKind::Up) => self.release_step(ReleaseReason::PointerUp),
            (Some(true), PointerEventKind::Cancel) => self.release_step(ReleaseReason::Cancel),
            (Some(true), PointerEventKind::LostCapture) => {
                self.release_step(ReleaseReason::LostCapture)
            }
        }
    }

    fn begin_drag(&mut self, event: &PointerEvent, restarted: bool) -> Step {
        let pointer_id = event.pointer_id;
        self.session = Some(DragSession::open(pointer_id));
        xrange_core::debug!(%pointer_id, restarted, "drag session opened");

        let (normal_value, notify) = match event.track_fraction() {
            Some(fraction) => {
                let moved = self.seek(fraction);
                (Some(self.model.normal_value()), moved)
            }
            None => {
                xrange_core::warn!(bounds = ?event.bounds, x = event.x, "unmappable pointer position");
                (None, false)
            }
        };
        Step::new(RangeEffect::DragStarted {
            pointer_id,
            normal_value,
            restarted,
        })
        .capture(CaptureCommand::Capture(pointer_id))
        .notify(notify)
    }

    fn track_pointer(&mut self, event: &PointerEvent) -> Step {
        let Some(fraction) = event.track_fraction() else {
            return Step::noop(RangeNoopReason::UnmappableGeometry);
        };
        if !self.seek(fraction) {
            return Step::noop(RangeNoopReason::PositionUnchanged);
        }
        Step::new(RangeEffect::DragUpdated {
            pointer_id: event.pointer_id,
            normal_value: self.model.normal_value(),
        })
        .notify(true)
    }

    /// Move to the quantized position under `fraction`. Returns whether the
    /// normalized value changed.
    fn seek(&mut self, fraction: f64) -> bool {
        let snapped = self.model.snap_normal(fraction);
        if snapped == self.model.normal_value() {
            return false;
        }
        self.model.apply(ValueInput::Normalized(snapped)).is_ok()
    }

    fn release_step(&mut self, reason: ReleaseReason) -> Step {
        let Some(pointer_id) = self.end_drag() else {
            return Step::noop(RangeNoopReason::IdleWithoutActiveDrag);
        };
        xrange_core::debug!(%pointer_id, %reason, "drag session released");
        let step = Step::new(RangeEffect::DragEnded { pointer_id, reason });
        match reason {
            // Capture is already gone.
            ReleaseReason::LostCapture => step,
            _ => step.capture(CaptureCommand::Release(pointer_id)),
        }
    }

    fn end_drag(&mut self) -> Option<PointerId> {
        self.session.take().map(DragSession::release)
    }

    fn key_step(&mut self, key: KeyEvent, focus: FocusTarget) -> Step {
        if !key.is_actionable() {
            return Step::noop(RangeNoopReason::KeyReleased);
        }
        if key.is_shortcut() {
            return Step::noop(RangeNoopReason::ShortcutChord);
        }
        let (steps, consumed) = match (focus, key.code) {
            (FocusTarget::Control, KeyCode::Right) => (1, false),
            (FocusTarget::Control, KeyCode::Left) => (-1, false),
            (FocusTarget::ValueLabel, _) if !self.options.text_edit => {
                return Step::noop(RangeNoopReason::TextEditDisabled);
            }
            (FocusTarget::ValueLabel, KeyCode::Up) => (1, true),
            (FocusTarget::ValueLabel, KeyCode::Down) => (-1, true),
            _ => return Step::noop(RangeNoopReason::UnboundKey),
        };
        match self.model.step_by(steps) {
            Ok(update) => Step::new(RangeEffect::KeyStepped {
                steps,
                focus,
                consumed,
            })
            .notify(self.options.notify_policy.should_notify(update.changed())),
            Err(_) => Step::noop(RangeNoopReason::RejectedValue),
        }
    }

    fn text_step(&mut self, text: &str) -> Step {
        if !self.options.text_edit {
            return Step::noop(RangeNoopReason::TextEditDisabled);
        }
        if is_mid_typing(text) {
            return Step::noop(RangeNoopReason::MidTyping);
        }
        let Some(parsed) = parse_leading_float(text) else {
            return Step::noop(RangeNoopReason::Unparseable);
        };
        match self.model.set_value(parsed) {
            Ok(update) => Step::new(RangeEffect::TextCommitted { parsed })
                .notify(self.options.notify_policy.should_notify(update.changed())),
            Err(_) => Step::noop(RangeNoopReason::RejectedValue),
        }
    }

    fn finish(&mut self, from: DragPhase, step: Step) -> RangeTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = RangeTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect: step.effect,
            capture: step.capture,
            notified: step.notify,
            state: self.model.state(),
        };
        xrange_core::debug!(
            transition_id = transition.transition_id,
            effect = ?transition.effect,
            notified = transition.notified,
            "range transition"
        );
        if step.notify {
            for (_, listener) in &mut self.listeners {
                listener(&CHANGE);
            }
        }
        transition
    }
}
