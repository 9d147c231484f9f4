// src/events/telemetry.rs
//
// Fire-and-forget usage telemetry. Events are logged, never stored or sent.

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::CharacterId;

#[derive(Debug, Clone, Serialize)]
pub struct TelemetryEvent {
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub action: String,
    pub details: Map<String, Value>,
}

impl TelemetryEvent {
    pub fn new(action: &str, details: Map<String, Value>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            details,
        }
    }
}

fn details(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Log an event and hand it back (handy for assertions)
pub fn log_event(action: &str, details: Map<String, Value>) -> TelemetryEvent {
    let event = TelemetryEvent::new(action, details);
    match serde_json::to_string(&event) {
        Ok(json) => log::info!("[TELEMETRY] {}", json),
        Err(e) => log::warn!("[TELEMETRY] unserializable event {}: {}", action, e),
    }
    event
}

pub fn log_screen_view(screen_name: &str) -> TelemetryEvent {
    log_event("screen_view", details(json!({ "screen": screen_name })))
}

pub fn log_favorite_toggle(character_id: CharacterId, is_favorite: bool) -> TelemetryEvent {
    log_event(
        "favorite_toggle",
        details(json!({ "character_id": character_id, "is_favorite": is_favorite })),
    )
}

pub fn log_filter_applied(filter_type: &str, filter_value: &str) -> TelemetryEvent {
    log_event(
        "filter_applied",
        details(json!({ "type": filter_type, "value": filter_value })),
    )
}

pub fn log_theme_change(theme: &str) -> TelemetryEvent {
    log_event("theme_change", details(json!({ "theme": theme })))
}

pub fn log_error(message: &str, error_details: Option<&str>) -> TelemetryEvent {
    log_event(
        "error",
        details(json!({ "message": message, "details": error_details })),
    )
}

pub fn log_api_call(endpoint: &str, success: bool) -> TelemetryEvent {
    log_event("api_call", details(json!({ "endpoint": endpoint, "success": success })))
}
