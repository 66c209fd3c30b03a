#![forbid(unsafe_code)]

//! Tracing integration tests for the menu bar.
//!
//! Spans and events enabled:
//!   cargo test -p dropbar-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p dropbar-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing")]
use dropbar_core::event::{Event, MouseEvent};
use dropbar_core::geometry::Rect;
#[cfg(feature = "tracing")]
use dropbar_core::scroll::ScrollSignal;
use dropbar_render::frame::Frame;
use dropbar_widgets::StatefulWidget;
use dropbar_widgets::menu::{Menu, MenuConfig, MenuItem, MenuOption, MenuState};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    /// Events whose message equals `message`.
    #[cfg(feature = "tracing")]
    fn events_named(&self, message: &str) -> Vec<Captured> {
        self.events()
            .into_iter()
            .filter(|e| e.fields.get("message").is_some_and(|m| m == message))
            .collect()
    }
}

/// Visitor that extracts fields as strings.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
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
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let layer = Capture::default();
    let handle = CaptureHandle {
        spans: layer.spans.clone(),
        events: layer.events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

fn menu() -> Menu {
    let options = vec![
        MenuOption::new("all", "All products"),
        MenuOption::new("new", "New products"),
    ];
    Menu::new(MenuConfig::default().with_scroll_fixed(true))
        .entry(MenuItem::new(options.clone()).value("all"))
        .entry(MenuItem::new(options).title("Sort").disabled(true))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn render_opens_widget_span() {
    let handle = with_captured(|| {
        let mut state = MenuState::new();
        let mut frame = Frame::with_hit_grid(20, 4);
        menu().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
    });

    let spans = handle.spans();
    let menu_span = spans
        .iter()
        .find(|s| s.name == "widget_render" && s.fields.get("widget").is_some_and(|w| w.contains("Menu")))
        .expect("Menu render span");
    assert_eq!(menu_span.fields.get("w").map(String::as_str), Some("20"));
    assert_eq!(menu_span.fields.get("h").map(String::as_str), Some("1"));
}

#[test]
#[cfg(feature = "tracing")]
fn toggle_and_disabled_click_emit_events() {
    let handle = with_captured(|| {
        let mut menu = menu();
        let mut state = MenuState::new();
        let mut frame = Frame::with_hit_grid(20, 4);
        menu.render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);

        for x in [2, 15] {
            let hit = frame.hit_test(x, 0);
            menu.handle_event(&Event::Mouse(MouseEvent::left_click(x, 0)), &mut state, hit);
        }
    });

    let toggles = handle.events_named("menu entry toggled");
    assert_eq!(toggles.len(), 1);
    assert_eq!(toggles[0].fields.get("index").map(String::as_str), Some("0"));
    assert_eq!(toggles[0].fields.get("open").map(String::as_str), Some("true"));
    assert_eq!(handle.events_named("menu click on disabled entry ignored").len(), 1);
}

#[test]
#[cfg(feature = "tracing")]
fn scroll_fixed_transition_and_subscription_events() {
    let handle = with_captured(|| {
        let host = dropbar_core::scroll::ScrollHost::window();
        let mut menu = menu();
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        menu.handle_event(&Event::Scroll(ScrollSignal::page(31)), &mut state, None);
        menu.handle_event(&Event::Scroll(ScrollSignal::page(40)), &mut state, None);
        state.unmount();
    });

    let changes = handle.events_named("menu scroll-fixed changed");
    assert_eq!(changes.len(), 1, "only the transition is logged");
    assert_eq!(changes[0].fields.get("fixed").map(String::as_str), Some("true"));
    assert_eq!(handle.events_named("scroll subscription acquired").len(), 1);
    assert_eq!(handle.events_named("scroll subscription released").len(), 1);
}

#[test]
fn zero_overhead_without_feature() {
    let handle = with_captured(|| {
        let mut state = MenuState::new();
        let mut frame = Frame::with_hit_grid(20, 4);
        menu().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
    });

    if cfg!(feature = "tracing") {
        assert!(!handle.spans().is_empty());
    } else {
        assert!(handle.spans().is_empty());
        assert!(handle.events().is_empty());
    }
}
