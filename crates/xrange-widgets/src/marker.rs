#![forbid(unsafe_code)]

//! Marker placement for renderers.

use xrange_core::geometry::TrackBounds;
use xrange_model::ValueState;

/// Where to draw the marker and what the label reads.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayout {
    /// Marker offset from the left edge of the track.
    pub offset: f64,
    /// Label text for the domain value.
    pub label: String,
}

impl MarkerLayout {
    /// Lay out the marker for `state` on a track `track_width` wide.
    ///
    /// Unusable widths (zero, negative, non-finite) pin the marker to the
    /// left edge.
    #[must_use]
    pub fn new(state: ValueState, track_width: f64) -> Self {
        let offset = if track_width.is_finite() && track_width > 0.0 {
            state.normal_value * track_width
        } else {
            0.0
        };
        Self {
            offset,
            label: format_label(state.value),
        }
    }

    /// Absolute marker position within `bounds`.
    #[must_use]
    pub fn position_in(state: ValueState, bounds: TrackBounds) -> f64 {
        bounds.left + Self::new(state, bounds.width).offset
    }
}

/// Shortest text that reads back as `value`, without a trailing `.0`.
#[must_use]
pub fn format_label(value: f64) -> String {
    // Avoid "-0" for values quantized up to zero from below.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}
