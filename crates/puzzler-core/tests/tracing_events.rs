//! Structured logging emitted by the board.
//!
//! Each test runs a board interaction under a capturing subscriber and
//! checks the level, message and fields of the events it produced.
//!
//! Run:
//!   cargo test -p puzzler-core --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use puzzler_core::{Board, BoardConfig, Piece, PieceId, Point};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use web_time::{Duration, Instant};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
    message: Option<String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct EventCaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message.as_deref() == Some(message))
            .collect()
    }

    fn one(&self, message: &str) -> CapturedEvent {
        let found = self.find(message);
        assert_eq!(
            found.len(),
            1,
            "expected exactly one {message:?} event, got {}: {:?}",
            found.len(),
            self.events()
                .iter()
                .filter_map(|e| e.message.clone())
                .collect::<Vec<_>>()
        );
        found.into_iter().next().unwrap()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields,
            message,
        });
    }
}

fn with_captured_events<F>(f: F) -> EventCaptureHandle
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    EventCaptureHandle { events }
}

/// Two plain pieces side by side, 5 units from linking.
fn near_pair() -> Board {
    let mut board = Board::new(BoardConfig::default().with_seed(5));
    board
        .bind(vec![Piece::plain(0, 0), Piece::plain(1, 0)])
        .expect("row");
    board.place_piece(PieceId::new(0), Point::new(0.0, 0.0)).expect("idle");
    board.place_piece(PieceId::new(1), Point::new(105.0, 3.0)).expect("idle");
    board
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn bind_logs_dimensions_at_info() {
    let handle = with_captured_events(|| {
        let mut board = Board::new(BoardConfig::default().with_seed(1));
        board
            .bind((0..3).map(|x| Piece::plain(x, 0)).collect())
            .expect("row");
    });

    let bound = handle.one("puzzle bound");
    assert_eq!(bound.level, tracing::Level::INFO);
    assert_eq!(bound.field("cols"), Some("3"));
    assert_eq!(bound.field("rows"), Some("1"));
    assert_eq!(bound.field("pieces"), Some("3"));
    assert!(bound.target.starts_with("puzzler_core"), "target = {}", bound.target);
}

#[test]
fn failed_bind_logs_nothing_at_info() {
    let handle = with_captured_events(|| {
        let mut board = Board::new(BoardConfig::default().with_seed(1));
        let result = board.bind(vec![Piece::plain(0, 0), Piece::plain(0, 0)]);
        assert!(result.is_err());
    });
    assert!(handle.find("puzzle bound").is_empty());
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn pointer_capture_is_logged_on_acquire_and_release() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        assert!(board.pointer_down(Point::new(155.0, 53.0)));
        board.pointer_up(Point::new(155.0, 53.0));
    });

    let acquired = handle.one("pointer capture acquired");
    let released = handle.one("pointer capture released");
    assert_eq!(acquired.level, tracing::Level::DEBUG);
    assert_eq!(released.level, tracing::Level::DEBUG);
    assert_eq!(acquired.field("piece"), Some("#1"));
    assert_eq!(released.field("piece"), Some("#1"));

    let messages: Vec<String> = handle.events().into_iter().filter_map(|e| e.message).collect();
    let pos = |m: &str| messages.iter().position(|x| x == m).unwrap();
    assert!(pos("pointer capture acquired") < pos("drag released"));
    assert!(pos("drag released") < pos("pointer capture released"));
}

#[test]
fn snap_link_and_completion_are_logged() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        board.pointer_down(Point::new(155.0, 53.0));
        board.pointer_up(Point::new(155.0, 53.0));
        assert!(board.is_solved());
    });

    let link = handle.one("snap link");
    assert_eq!(link.level, tracing::Level::DEBUG);
    assert_eq!(link.field("moved"), Some("#1"));
    assert_eq!(link.field("neighbor"), Some("#0"));
    assert_eq!(link.field("side"), Some("West"));

    let done = handle.one("puzzle completed");
    assert_eq!(done.level, tracing::Level::INFO);
    assert_eq!(done.field("move_count"), Some("1"));
}

#[test]
fn cancelled_drag_releases_capture_without_snapping() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        board.pointer_down(Point::new(155.0, 53.0));
        assert!(board.cancel_drag());
    });
    assert_eq!(handle.one("drag cancelled").level, tracing::Level::DEBUG);
    handle.one("pointer capture released");
    assert!(handle.find("snap link").is_empty());
    assert!(handle.find("drag released").is_empty());
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn second_transition_is_rejected_at_warn() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        let t0 = Instant::now();
        board.randomize(t0);
        board.solve(t0 + Duration::from_millis(10));
    });

    let started = handle.one("transition started");
    assert_eq!(started.level, tracing::Level::INFO);
    assert_eq!(started.field("kind"), Some("Scatter"));
    assert_eq!(started.field("duration_ms"), Some("500"));

    let rejected = handle.one("rejected while animating");
    assert_eq!(rejected.level, tracing::Level::WARN);
    assert_eq!(rejected.field("command"), Some("solve"));
}

#[test]
fn pointer_input_during_transition_is_traced() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        board.solve(Instant::now());
        assert!(!board.pointer_down(Point::new(50.0, 50.0)));
    });

    let ignored = handle.one("pointer down ignored while animating");
    assert_eq!(ignored.level, tracing::Level::TRACE);
    assert_eq!(ignored.field("x"), Some("50"));
    assert_eq!(ignored.field("y"), Some("50"));
}

#[test]
fn finished_transitions_are_logged_at_info() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        let t0 = Instant::now();
        board.solve(t0);
        board.tick(t0 + Duration::from_millis(500));
        board.randomize(t0 + Duration::from_secs(1));
        board.tick(t0 + Duration::from_secs(2));
    });

    let solved = handle.one("puzzle auto-solved");
    assert_eq!(solved.level, tracing::Level::INFO);
    assert_eq!(solved.field("move_count"), Some("0"));

    let randomized = handle.one("puzzle randomized");
    assert_eq!(randomized.level, tracing::Level::INFO);
    assert_eq!(randomized.field("was_solved"), Some("true"));
}

#[test]
fn transition_cancels_live_drag() {
    let handle = with_captured_events(|| {
        let mut board = near_pair();
        board.pointer_down(Point::new(155.0, 53.0));
        board.randomize(Instant::now());
        assert!(!board.has_pointer_capture());
    });

    let cancelled = handle.one("drag cancelled by transition");
    assert_eq!(cancelled.level, tracing::Level::DEBUG);
    assert_eq!(cancelled.field("command"), Some("randomize"));
    handle.one("pointer capture released");
}
