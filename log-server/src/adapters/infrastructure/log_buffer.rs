use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Subscriber;
use tracing_subscriber::Layer;

use crate::domain::models::LogRecord;

pub const MAX_LOG_ENTRIES: usize = 1000;

/// Thread-safe buffer of the server's own log records, newest first
pub type LogBuffer = Arc<RwLock<VecDeque<LogRecord>>>;

/// Create a new empty log buffer
pub fn create_log_buffer() -> LogBuffer {
    Arc::new(RwLock::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)))
}

/// Push a record to the front of the buffer, evicting the oldest past capacity
pub fn push_record(buffer: &mut VecDeque<LogRecord>, record: LogRecord) {
    buffer.push_front(record);
    if buffer.len() > MAX_LOG_ENTRIES {
        buffer.pop_back();
    }
}

/// Custom tracing layer that captures events into a [`LogBuffer`]
pub struct LogBufferLayer {
    buffer: LogBuffer,
}

impl LogBufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogBufferLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: metadata.level().to_string(),
            message: visitor.render(),
            target: Some(metadata.target().to_string()),
        };

        // Never block the emitting thread; drop the event under contention
        if let Ok(mut buffer) = self.buffer.try_write() {
            push_record(&mut buffer, record);
        }
    }
}

/// Visitor to extract the message and structured fields of an event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, JsonValue>,
}

impl FieldVisitor {
    /// Message followed by `key=value` pairs in field-name order
    fn render(self) -> String {
        let mut rendered = self.message;
        for (name, value) in self.fields {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            match value {
                JsonValue::String(s) => rendered.push_str(&format!("{}={}", name, s)),
                other => rendered.push_str(&format!("{}={}", name, other)),
            }
        }
        rendered
    }
}

fn strip_quotes(value: String) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let field_value = strip_quotes(format!("{:?}", value));

        if field.name() == "message" {
            self.message = field_value;
        } else {
            self.fields
                .insert(field.name().to_string(), JsonValue::String(field_value));
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), JsonValue::Number(value.into()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), JsonValue::Number(value.into()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        if let Some(num) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), JsonValue::Number(num));
        }
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), JsonValue::Bool(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(
                field.name().to_string(),
                JsonValue::String(value.to_string()),
            );
        }
    }
}
