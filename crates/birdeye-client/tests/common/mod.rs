//! Shared helpers for integration tests

#![allow(dead_code)]

use birdeye_client::{Client, Fields, Logger, logger::DisplayFields};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Wrap `data` in a successful Birdeye envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Client pointed at `server` with retries disabled
pub fn test_client(server: &MockServer) -> Client {
    Client::builder(TEST_API_KEY)
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .unwrap()
}

/// Client pointed at `server` with `max_retries` and millisecond waits
pub fn retrying_client(server: &MockServer, max_retries: u32) -> Client {
    Client::builder(TEST_API_KEY)
        .base_url(server.uri())
        .max_retries(max_retries)
        .retry_wait(Duration::from_millis(1), Duration::from_millis(5))
        .build()
        .unwrap()
}

/// One captured log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: &'static str,
    pub message: String,
    pub fields: String,
}

/// Logger that records every call for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn at(&self, level: &str) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    fn record(&self, level: &'static str, msg: &str, fields: Fields<'_>) {
        self.events.lock().unwrap().push(LogEvent {
            level,
            message: msg.to_string(),
            fields: DisplayFields(fields).to_string(),
        });
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, msg: &str, fields: Fields<'_>) {
        self.record("debug", msg, fields);
    }

    fn info(&self, msg: &str, fields: Fields<'_>) {
        self.record("info", msg, fields);
    }

    fn warn(&self, msg: &str, fields: Fields<'_>) {
        self.record("warn", msg, fields);
    }

    fn error(&self, msg: &str, fields: Fields<'_>) {
        self.record("error", msg, fields);
    }
}
