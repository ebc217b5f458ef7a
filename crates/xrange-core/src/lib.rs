#![forbid(unsafe_code)]

//! Core: numeric utilities, track geometry, canonical input events, and logging.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod numeric;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, trace_span, warn};
