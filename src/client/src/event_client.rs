use crate::event_forward::PendingEvent;
use serde_json::Value;
use tesmon_common::ConfigError;

/// Anything that can report an event to Tesmon.
pub trait EventClient {
    /// Sends an event to Tesmon.
    ///
    /// Target configuration is checked before anything is sent; a missing
    /// field is returned immediately. Otherwise the returned future resolves
    /// with the server's raw response body, for any status code: an
    /// `eventId` on success, or a `message`/`error` field when the server
    /// rejected the event.
    fn send_event(
        &self,
        event_key: &str,
        event_body: Option<Value>,
    ) -> Result<PendingEvent, ConfigError>;
}
