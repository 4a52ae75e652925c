use crate::config::WireFormat;
use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// The JSON object transmitted for a single event.
///
/// Field names depend on the target: a self-hosted engine expects
/// `eventKey`/`eventBody`/`createdAt`, the multi-tenant service expects
/// `key`/`value` and stamps events itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventEnvelope {
    #[serde(rename_all = "camelCase")]
    SelfHosted {
        event_key: String,
        event_body: Value,
        #[serde(with = "ts_milliseconds")]
        created_at: DateTime<Utc>,
    },
    Environment {
        key: String,
        value: Value,
    },
}

impl EventEnvelope {
    pub fn build(format: WireFormat, event_key: &str, event_body: Option<Value>) -> Self {
        Self::build_at(format, event_key, event_body, Utc::now())
    }

    /// `created_at` is ignored by formats that carry no timestamp.
    pub fn build_at(
        format: WireFormat,
        event_key: &str,
        event_body: Option<Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let body = event_body.unwrap_or(Value::Null);
        match format {
            WireFormat::SelfHosted => EventEnvelope::SelfHosted {
                event_key: event_key.to_string(),
                event_body: body,
                created_at,
            },
            WireFormat::Environment => EventEnvelope::Environment {
                key: event_key.to_string(),
                value: body,
            },
        }
    }

    pub fn event_key(&self) -> &str {
        match self {
            EventEnvelope::SelfHosted { event_key, .. } => event_key,
            EventEnvelope::Environment { key, .. } => key,
        }
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
