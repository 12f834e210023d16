//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use genstudio::prelude::*;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

/// 1x1 transparent PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89,
];

pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Config pointing every provider at `server` with millisecond delays.
pub fn config(server: &MockServer) -> StudioConfigBuilder {
    StudioConfig::builder()
        .base_url(server.uri())
        .poll_interval(Duration::from_millis(5))
        .demo_delay(Duration::from_millis(5))
        .cold_start(
            ColdStartPolicy::new()
                .with_default_wait(Duration::from_millis(5))
                .with_max_wait(Some(Duration::from_millis(10))),
        )
}

pub fn studio(server: &MockServer) -> Studio {
    Studio::new(config(server).build()).expect("studio")
}

pub fn studio_with_google_key(server: &MockServer, key: &str) -> Studio {
    Studio::new(config(server).google_api_key(key).build()).expect("studio")
}

/// Progress sink that records every message.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ProgressSink for Recorder {
    fn report(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// Replies with each template in turn, repeating the last one.
pub struct Sequence {
    responses: Vec<ResponseTemplate>,
    calls: AtomicUsize,
}

impl Sequence {
    pub fn new(responses: Vec<ResponseTemplate>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for Sequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses[n.min(self.responses.len() - 1)].clone()
    }
}

pub fn body_json(req: &Request) -> serde_json::Value {
    serde_json::from_slice(&req.body).unwrap_or(serde_json::Value::Null)
}
