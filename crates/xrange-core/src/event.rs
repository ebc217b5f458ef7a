#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native input (DOM pointer events, terminal mouse
//! reports, key presses, edits of the inline value label) into these types
//! before handing them to the range controller. All events are plain data
//! and round-trip through serde, which is what the replay harness relies on.
//!
//! # Design Notes
//!
//! - Pointer coordinates are `f64` in whatever space the host measures the
//!   track in; every pointer event carries the [`TrackBounds`] it was
//!   measured against, so the core never asks for layout.
//! - Keyboard focus is explicit: the host says which part of the control
//!   has focus ([`FocusTarget`]) instead of the core walking a focus tree.
//! - `KeyEventKind` defaults to `Press`; releases never step the value.
//! - Only the arrow keys exist as [`KeyCode`]s. Hosts drop every other key
//!   before it reaches the controller.

use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;
use serde::{Deserialize, Serialize};

use crate::geometry::TrackBounds;

/// Pointer id used for events converted from a terminal mouse.
pub const MOUSE_POINTER_ID: PointerId = PointerId(1);

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),

    /// A keyboard event, delivered together with the focused part.
    Key {
        key: KeyEvent,
        #[serde(default)]
        focus: FocusTarget,
    },

    /// The inline value label's text changed.
    TextInput(TextInputEvent),

    /// The control lost focus.
    Blur,
}

/// Host-assigned pointer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Button pressed on the control.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// The platform cancelled the pointer (touch interrupted, etc).
    Cancel,
    /// Pointer capture was taken away from the control.
    LostCapture,
}

/// Pointer button identifiers. Only [`PointerButton::Primary`] starts a
/// drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event with the geometry it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// The lifecycle phase.
    pub kind: PointerEventKind,

    /// Which pointer produced the event.
    pub pointer_id: PointerId,

    /// Button involved (meaningful for `Down`/`Up`).
    #[serde(default)]
    pub button: PointerButton,

    /// Horizontal pointer position.
    pub x: f64,

    /// Track extent in the same coordinate space as `x`.
    pub bounds: TrackBounds,
}

impl PointerEvent {
    /// Create a primary-button pointer event.
    #[must_use]
    pub const fn new(
        kind: PointerEventKind,
        pointer_id: PointerId,
        x: f64,
        bounds: TrackBounds,
    ) -> Self {
        Self {
            kind,
            pointer_id,
            button: PointerButton::Primary,
            x,
            bounds,
        }
    }

    /// Shorthand for a primary-button press.
    #[must_use]
    pub const fn down(pointer_id: PointerId, x: f64, bounds: TrackBounds) -> Self {
        Self::new(PointerEventKind::Down, pointer_id, x, bounds)
    }

    /// Shorthand for a move.
    #[must_use]
    pub const fn moved(pointer_id: PointerId, x: f64, bounds: TrackBounds) -> Self {
        Self::new(PointerEventKind::Move, pointer_id, x, bounds)
    }

    /// Shorthand for a primary-button release.
    #[must_use]
    pub const fn up(pointer_id: PointerId, x: f64, bounds: TrackBounds) -> Self {
        Self::new(PointerEventKind::Up, pointer_id, x, bounds)
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Whether this is a press of the primary button.
    #[must_use]
    pub const fn is_primary_press(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down) && matches!(self.button, PointerButton::Primary)
    }

    /// Unclamped track fraction under the pointer, if it can be computed.
    #[must_use]
    pub fn track_fraction(&self) -> Option<f64> {
        self.bounds.fraction_at(self.x)
    }

    /// Convert a crossterm mouse report measured against `bounds`.
    ///
    /// Scroll reports have no slider meaning and map to `None`. Drags with
    /// any button become moves.
    #[must_use]
    #[cfg(feature = "crossterm")]
    pub fn from_crossterm(event: cte::MouseEvent, bounds: TrackBounds) -> Option<Self> {
        let (kind, button) = match event.kind {
            cte::MouseEventKind::Down(button) => (PointerEventKind::Down, map_button(button)),
            cte::MouseEventKind::Up(button) => (PointerEventKind::Up, map_button(button)),
            cte::MouseEventKind::Drag(button) => (PointerEventKind::Move, map_button(button)),
            cte::MouseEventKind::Moved => (PointerEventKind::Move, PointerButton::Primary),
            _ => return None,
        };
        Some(
            Self::new(kind, MOUSE_POINTER_ID, f64::from(event.column), bounds).with_button(button),
        )
    }
}

/// Which part of the control holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// The track itself.
    #[default]
    Control,
    /// The inline, editable value label.
    ValueLabel,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event. Chords with
    /// [`Modifiers::SHORTCUT`] belong to the host, not the control.
    #[serde(default)]
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    #[serde(default)]
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event should act (press or auto-repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    /// Whether a Ctrl, Alt, or Super modifier is held. Shift is not a
    /// shortcut modifier.
    #[must_use]
    pub const fn is_shortcut(&self) -> bool {
        self.modifiers.intersects(Modifiers::SHORTCUT)
    }

    /// Convert a crossterm key event.
    #[must_use]
    #[cfg(feature = "crossterm")]
    pub fn from_crossterm(event: cte::KeyEvent) -> Option<Self> {
        let code = match event.code {
            cte::KeyCode::Left => KeyCode::Left,
            cte::KeyCode::Right => KeyCode::Right,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            _ => return None,
        };
        let kind = match event.kind {
            cte::KeyEventKind::Press => KeyEventKind::Press,
            cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
            cte::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(Self {
            code,
            modifiers: map_modifiers(event.modifiers),
            kind,
        })
    }
}

/// Key codes the control can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
        /// Modifiers that turn a key into a host shortcut.
        const SHORTCUT = Self::ALT.bits() | Self::CTRL.bits() | Self::SUPER.bits();
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// New content of the inline value label after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputEvent {
    /// Full label text after the edit.
    pub text: String,
}

impl TextInputEvent {
    /// Create a text input event.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(feature = "crossterm")]
fn map_button(button: cte::MouseButton) -> PointerButton {
    match button {
        cte::MouseButton::Left => PointerButton::Primary,
        cte::MouseButton::Right => PointerButton::Secondary,
        cte::MouseButton::Middle => PointerButton::Middle,
    }
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}
