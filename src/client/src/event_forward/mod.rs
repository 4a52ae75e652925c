//! Event forwarding to a Tesmon target
//!
//! Each event is delivered by a single HTTP POST on the sender's runtime and
//! settles one [`PendingEvent`].
//!
//! # Example
//!
//! ```rust,no_run
//! # use anyhow::Result;
//! # use serde_json::json;
//! # use tesmon_client::{EventClient, EventSender, SenderConfig};
//! # use tesmon_common::Target;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let sender = EventSender::try_new(SenderConfig::new(
//!     Target::environment("1001", "api-token"),
//! ))?;
//! let response = sender
//!     .send_event("checkout.completed", Some(json!({"orderId": 42})))?
//!     .await?;
//! println!("{}", response);
//! sender.close().await;
//! # Ok(())
//! # }
//! ```

mod client;
mod delivery;
mod error;
mod pending;

pub use client::{EventSender, SenderConfig};
pub use error::{EventSendError, EventSendResult};
pub use pending::PendingEvent;
