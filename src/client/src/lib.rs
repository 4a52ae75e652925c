pub mod event_client;
pub mod event_forward;

pub use event_client::EventClient;
pub use event_forward::{EventSendError, EventSendResult, EventSender, PendingEvent, SenderConfig};
