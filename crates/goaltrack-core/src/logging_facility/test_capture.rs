//! In-memory log capture for tests
//!
//! `init_test_capture()` installs a global subscriber whose only layer
//! records every event. Tests then query the recording by operation name
//! and boundary event.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, OnceLock};

use goaltrack_core_types::schema::{FIELD_EVENT, FIELD_OP};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event; every field value is kept in its display form
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    fields: BTreeMap<&'static str, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// The boundary marker (`start`, `end`, `end_error`), if any
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn is(&self, event: &str) -> bool {
        self.event() == Some(event)
    }
}

struct Recorder<'a>(&'a mut BTreeMap<&'static str, String>);

impl Visit for Recorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name(), format!("{:?}", value));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct RecordingLayer(Sink);

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut fields = BTreeMap::new();
        event.record(&mut Recorder(&mut fields));

        if let Ok(mut sink) = self.0.lock() {
            sink.push(CapturedEvent {
                level: *meta.level(),
                target: meta.target().to_owned(),
                fields,
            });
        }
    }
}

/// Read side of the global recording
///
/// Tests in one binary share it and run in parallel, so filter on an
/// operation name or a field value that only your test produces.
#[derive(Clone)]
pub struct TestCapture(Sink);

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().map(|sink| sink.clone()).unwrap_or_default()
    }

    /// Events of operation `op` that satisfy `predicate`
    pub fn matching<F>(&self, op: &str, predicate: F) -> Vec<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op) && predicate(e))
            .collect()
    }

    /// # Panics
    ///
    /// When no `event` boundary of `op` was recorded
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let count = self.matching(op, |e| e.is(event)).len();
        assert!(
            count > 0,
            "no `{}` event for op `{}` among {} recorded events",
            event,
            op,
            self.events().len()
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the recording subscriber on first call and return a handle
///
/// ```
/// use goaltrack_core::logging_facility::test_capture::init_test_capture;
/// use goaltrack_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink = Sink::default();
            // Loses to a subscriber installed earlier in the same process.
            let _ = tracing_subscriber::registry()
                .with(RecordingLayer(Arc::clone(&sink)))
                .try_init();
            TestCapture(sink)
        })
        .clone()
}
