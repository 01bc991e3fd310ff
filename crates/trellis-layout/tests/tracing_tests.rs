#![forbid(unsafe_code)]

//! Tracing instrumentation of layout passes.
//!
//! Spans enabled:
//!   cargo test -p trellis-layout --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p trellis-layout --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use trellis_layout::{Direction, Layout, Leaf, Padding, Rect, Size, SizeSpec};
#[cfg(feature = "tracing")]
use trellis_layout::{GridLayout, LayoutError};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    span_name: Option<String>,
}

/// A layer recording every new span and event.
#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn layout_passes(&self) -> Vec<CapturedSpan> {
        self.spans()
            .into_iter()
            .filter(|span| span.name == "layout_pass")
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
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
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();

        let span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            span_name,
        });
    }
}

/// Run `f` under a subscriber that records spans and events.
fn with_capture<F>(f: F) -> Capture
where
    F: FnOnce(),
{
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

// ============================================================================
// Spans
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn every_pass_opens_a_layout_span() {
    let capture = with_capture(|| {
        let mut children = vec![Leaf::fixed(10, 10), Leaf::fixed(20, 10)];
        let layout = Layout::flow(Direction::Horizontal);
        layout
            .estimate_layout_size(&children, Size::new(100, 40), Padding::default())
            .unwrap();
        layout
            .arrange_children(&mut children, Rect::new(3, 4, 103, 44), Padding::default())
            .unwrap();
    });

    let passes = capture.layout_passes();
    assert_eq!(passes.len(), 2, "expected one span per pass: {passes:?}");

    let estimate = &passes[0].fields;
    assert_eq!(estimate.get("strategy").map(String::as_str), Some("flow"));
    assert_eq!(estimate.get("pass").map(String::as_str), Some("estimate"));
    assert_eq!(estimate.get("children").map(String::as_str), Some("2"));

    let arrange = &passes[1].fields;
    assert_eq!(arrange.get("pass").map(String::as_str), Some("arrange"));
    assert_eq!(arrange.get("left").map(String::as_str), Some("3"));
    assert_eq!(arrange.get("top").map(String::as_str), Some("4"));
    assert_eq!(arrange.get("width").map(String::as_str), Some("100"));
    assert_eq!(arrange.get("height").map(String::as_str), Some("40"));
}

#[test]
#[cfg(feature = "tracing")]
fn each_strategy_reports_its_name() {
    let capture = with_capture(|| {
        let mut children = vec![Leaf::fixed(10, 10)];
        for layout in [
            Layout::float(),
            Layout::horizontal(),
            Layout::flow(Direction::Vertical),
            Layout::tile(trellis_layout::TileLayout::horizontal()),
            Layout::grid(GridLayout::new()),
        ] {
            layout
                .arrange_children(&mut children, Rect::new(0, 0, 50, 50), Padding::default())
                .unwrap();
        }
    });

    let names: Vec<String> = capture
        .layout_passes()
        .iter()
        .filter_map(|span| span.fields.get("strategy").cloned())
        .collect();
    assert_eq!(names, ["float", "linear", "flow", "tile", "grid"]);
}

// ============================================================================
// Events
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn clamp_rounds_are_traced_inside_the_pass() {
    let capture = with_capture(|| {
        let mut children = vec![
            Leaf::new(0, 5).width(SizeSpec::FILL).max_size(Some(10), None),
            Leaf::new(0, 5).width(SizeSpec::FILL),
        ];
        Layout::horizontal()
            .arrange_children(&mut children, Rect::new(0, 0, 100, 5), Padding::default())
            .unwrap();
    });

    let rounds: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|event| event.message == "stretch shares clamped")
        .collect();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].level, tracing::Level::TRACE);
    assert_eq!(rounds[0].span_name.as_deref(), Some("layout_pass"));
    assert_eq!(rounds[0].fields.get("clamped").map(String::as_str), Some("1"));
}

#[test]
#[cfg(feature = "tracing")]
fn grid_conflicts_are_warned() {
    let capture = with_capture(|| {
        let mut children = vec![Leaf::fixed(5, 5), Leaf::fixed(5, 5)];
        let result = Layout::grid(GridLayout::new().rows(1).columns(1)).arrange_children(
            &mut children,
            Rect::new(0, 0, 10, 10),
            Padding::default(),
        );
        assert_eq!(result, Err(LayoutError::GridFull { child: 1 }));
    });

    let warnings: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|event| event.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(warnings[0].message, "grid placement aborted");
    assert_eq!(warnings[0].fields.get("rows").map(String::as_str), Some("1"));
}

// ============================================================================
// Zero overhead
// ============================================================================

/// Without the `tracing` feature the instrumentation compiles away.
#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_when_disabled() {
    let capture = with_capture(|| {
        let mut children = vec![Leaf::fixed(10, 10)];
        Layout::vertical()
            .arrange_children(&mut children, Rect::new(0, 0, 50, 50), Padding::default())
            .unwrap();
    });
    assert!(capture.layout_passes().is_empty());
    assert!(capture.events().is_empty());
}
