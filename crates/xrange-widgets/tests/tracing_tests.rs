#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Controller spans and events enabled:
//!   cargo test -p xrange-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p xrange-widgets --test tracing_tests -- zero_overhead

use std::sync::{Arc, Mutex};

use xrange_core::event::{FocusTarget, KeyCode, KeyEvent, PointerEvent, PointerId};
use xrange_core::geometry::TrackBounds;
use xrange_model::RangeConfig;
use xrange_widgets::RangeControl;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured log event with the span it was emitted in.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    message: String,
    fields: Vec<(String, String)>,
    span: Option<String>,
}

/// A tracing Layer that records span names and events.
struct Capture {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Handle to read captured data after the run.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn new() -> (Self, CaptureHandle) {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            spans: spans.clone(),
            events: events.clone(),
        };
        (Self { spans, events }, handle)
    }
}

impl CaptureHandle {
    #[allow(dead_code)]
    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Visitor that extracts fields, splitting out `message`.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let span = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            message: visitor.message,
            fields: visitor.fields,
            span,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> CaptureHandle {
    let (layer, handle) = Capture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

fn scripted_drag(control: &mut RangeControl) {
    let track = TrackBounds::new(0.0, 200.0);
    control.handle_pointer(&PointerEvent::down(PointerId(1), 60.0, track));
    control.handle_pointer(&PointerEvent::moved(PointerId(1), 120.0, track));
    control.handle_pointer(&PointerEvent::up(PointerId(1), 120.0, track));
    control.handle_key(KeyEvent::new(KeyCode::Right), FocusTarget::Control);
}

// ============================================================================
// Feature-enabled tests
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn handlers_open_named_spans() {
    let handle = with_capture(|| {
        let mut control = RangeControl::new(RangeConfig::new(0.0, 10.0, 1.0).expect("valid"));
        scripted_drag(&mut control);
        control.handle_blur();
        control.handle_text_input("5");
    });
    let spans = handle.spans();
    assert_eq!(
        spans.iter().filter(|name| *name == "range.pointer").count(),
        3
    );
    assert!(spans.iter().any(|name| name == "range.key"));
    assert!(spans.iter().any(|name| name == "range.blur"));
    assert!(spans.iter().any(|name| name == "range.text_input"));
}

#[cfg(feature = "tracing")]
#[test]
fn every_transition_is_logged_inside_its_span() {
    let handle = with_capture(|| {
        let mut control = RangeControl::new(RangeConfig::new(0.0, 10.0, 1.0).expect("valid"));
        scripted_drag(&mut control);
    });
    let transitions: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|event| event.message == "range transition")
        .collect();
    assert_eq!(transitions.len(), 4);
    assert_eq!(transitions[0].span.as_deref(), Some("range.pointer"));
    assert_eq!(transitions[3].span.as_deref(), Some("range.key"));
    assert!(
        transitions[0]
            .fields
            .iter()
            .any(|(name, value)| name == "transition_id" && value == "1")
    );
}

#[cfg(feature = "tracing")]
#[test]
fn session_lifecycle_is_logged() {
    let handle = with_capture(|| {
        let mut control = RangeControl::new(RangeConfig::new(0.0, 10.0, 1.0).expect("valid"));
        scripted_drag(&mut control);
    });
    let messages: Vec<String> = handle.events().into_iter().map(|e| e.message).collect();
    assert!(messages.iter().any(|m| m == "drag session opened"));
    assert!(messages.iter().any(|m| m == "drag session released"));
}

#[cfg(feature = "tracing")]
#[test]
fn unmappable_geometry_warns() {
    let handle = with_capture(|| {
        let mut control = RangeControl::default();
        control.handle_pointer(&PointerEvent::down(
            PointerId(1),
            10.0,
            TrackBounds::from_width(0.0),
        ));
    });
    assert!(
        handle
            .events()
            .iter()
            .any(|event| event.message == "unmappable pointer position")
    );
}

#[cfg(feature = "tracing")]
#[test]
fn nan_write_warns_from_model() {
    let handle = with_capture(|| {
        let mut control = RangeControl::default();
        let _ = control.set_value(f64::NAN);
    });
    assert!(
        handle
            .events()
            .iter()
            .any(|event| event.message == "rejected NaN value input")
    );
}

// ============================================================================
// Zero-overhead (feature disabled)
// ============================================================================

#[cfg(not(feature = "tracing"))]
#[test]
fn zero_overhead_no_spans_or_events() {
    let handle = with_capture(|| {
        let mut control = RangeControl::new(RangeConfig::new(0.0, 10.0, 1.0).expect("valid"));
        scripted_drag(&mut control);
        assert_eq!(control.value(), 7.0);
    });
    assert!(handle.spans().is_empty());
    assert!(handle.events().is_empty());
}
