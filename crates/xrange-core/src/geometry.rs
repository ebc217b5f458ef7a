#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Horizontal extent of a slider track, supplied by the host on every
/// pointer event.
///
/// Uses the same coordinate space as the pointer position it accompanies
/// (client pixels, terminal cells, ...). The core performs no layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackBounds {
    /// Left edge (inclusive).
    pub left: f64,
    /// Track width.
    pub width: f64,
}

impl TrackBounds {
    /// Create new track bounds.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Bounds starting at the origin with the given width.
    #[inline]
    #[must_use]
    pub const fn from_width(width: f64) -> Self {
        Self::new(0.0, width)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Whether a pointer position can be mapped against these bounds.
    ///
    /// Zero, negative, or non-finite widths and non-finite edges cannot.
    #[inline]
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }

    /// Fraction of the track covered at pointer position `x`.
    ///
    /// Unclamped: positions left of the track give negative fractions and
    /// positions past the right edge give fractions above one. Returns
    /// `None` when the bounds are unusable or `x` is not finite.
    #[must_use]
    pub fn fraction_at(&self, x: f64) -> Option<f64> {
        if !self.is_usable() || !x.is_finite() {
            return None;
        }
        Some((x - self.left) / self.width)
    }

    /// Offset from the left edge for a normalized position.
    #[inline]
    #[must_use]
    pub fn offset_of(&self, normal: f64) -> f64 {
        self.width * normal
    }
}

impl From<(f64, f64)> for TrackBounds {
    fn from((left, width): (f64, f64)) -> Self {
        Self::new(left, width)
    }
}
