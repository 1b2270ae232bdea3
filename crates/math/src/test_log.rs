//! Captures `tracing` events emitted while a closure runs.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// One recorded event: level, rendered message and every other field.
#[derive(Debug, Clone)]
pub struct LoggedEvent {
	pub level: Level,
	pub message: String,
	pub fields: Vec<(&'static str, String)>,
}

impl LoggedEvent {
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
	}
}

struct CaptureLayer {
	events: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
	S: Subscriber,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut logged = LoggedEvent {
			level: *event.metadata().level(),
			message: String::new(),
			fields: Vec::new(),
		};
		event.record(&mut FieldVisitor(&mut logged));
		self.events.lock().push(logged);
	}
}

struct FieldVisitor<'a>(&'a mut LoggedEvent);

impl Visit for FieldVisitor<'_> {
	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		let value = format!("{value:?}");
		if field.name() == "message" {
			self.0.message = value;
		} else {
			self.0.fields.push((field.name(), value));
		}
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.0.message = value.to_owned();
		} else {
			self.0.fields.push((field.name(), value.to_owned()));
		}
	}
}

/// Runs `f` under a thread-local subscriber and returns what it logged.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<LoggedEvent>) {
	let events = Arc::new(Mutex::new(Vec::new()));
	let subscriber = tracing_subscriber::registry().with(CaptureLayer { events: events.clone() });
	let result = tracing::subscriber::with_default(subscriber, f);
	let events = std::mem::take(&mut *events.lock());
	(result, events)
}

/// Only the `WARN` events of `events`.
pub fn warnings(events: &[LoggedEvent]) -> Vec<&LoggedEvent> {
	events.iter().filter(|event| event.level == Level::WARN).collect()
}
