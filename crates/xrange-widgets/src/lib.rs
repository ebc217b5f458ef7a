#![forbid(unsafe_code)]

//! Interaction layer for the range slider.
//!
//! - [`range`]: the [`RangeControl`] controller and its transition telemetry.
//! - [`drag`]: drag session and host-side subscription handles.
//! - [`text_edit`]: parsing rules for the inline value label.
//! - [`marker`]: marker offset and label text for renderers.

pub mod drag;
pub mod marker;
pub mod range;
pub mod text_edit;

pub use drag::{DragSession, DragSubscription, ReleaseReason};
pub use marker::MarkerLayout;
pub use range::{
    CaptureCommand, ChangeListener, ChangeNotification, DragPhase, ListenerId, NotifyPolicy,
    RangeControl, RangeEffect, RangeNoopReason, RangeOptions, RangeTransition,
};
