use super::delivery::{deliver, EventRequest};
use super::error::EventSendError;
use super::pending::PendingEvent;
use crate::event_client::EventClient;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tesmon_common::{Config, ConfigError, ConfigLoader, EventEnvelope, Target, Timeouts};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

/// Configuration for an event sender
#[derive(Clone, Debug)]
pub struct SenderConfig {
    pub target: Target,
    pub timeouts: Timeouts,
}

impl SenderConfig {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

impl From<&Config> for SenderConfig {
    fn from(config: &Config) -> Self {
        Self {
            target: config.target(),
            timeouts: config.timeouts(),
        }
    }
}

/// Sends events to a Tesmon target.
///
/// The HTTP client and its connection pool live as long as the sender.
/// Every call to [`EventClient::send_event`] is an independent single attempt
/// running on the runtime the sender was created in.
pub struct EventSender {
    target: Target,
    client: Client,
    runtime: Handle,
    tasks: TaskTracker,
    shutdown: CancellationToken,
}

impl EventSender {
    /// Must be called from within a Tokio runtime.
    pub fn try_new(config: SenderConfig) -> Result<Self> {
        let runtime =
            Handle::try_current().context("EventSender requires a running Tokio runtime")?;

        let mut builder = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .read_timeout(config.timeouts.read);
        if let Some(request) = config.timeouts.request {
            builder = builder.timeout(request);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        debug!("Created event sender for {:?}", config.target);

        Ok(Self {
            target: config.target,
            client,
            runtime,
            tasks: TaskTracker::new(),
            shutdown: CancellationToken::new(),
        })
    }

    /// Build a sender from `TESMON_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ConfigLoader::load_default_config()?;
        Self::try_new(SenderConfig::from(&config))
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Number of deliveries that have not settled yet
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_closed(&self) -> bool {
        self.tasks.is_closed()
    }

    /// Stop accepting events and wait for in-flight deliveries to settle.
    pub async fn close(&self) {
        self.tasks.close();
        self.tasks.wait().await;
    }

    /// Stop accepting events and cancel in-flight deliveries.
    pub fn shutdown(&self) {
        self.tasks.close();
        self.shutdown.cancel();
    }
}

impl EventClient for EventSender {
    fn send_event(
        &self,
        event_key: &str,
        event_body: Option<Value>,
    ) -> Result<PendingEvent, ConfigError> {
        self.target.validate()?;

        if self.is_closed() {
            debug!("Sender is closed, dropping event {}", event_key);
            return Ok(PendingEvent::resolved(Err(EventSendError::Cancelled)));
        }

        let request = EventRequest {
            client: self.client.clone(),
            target: self.target.clone(),
            envelope: EventEnvelope::build(self.target.wire_format(), event_key, event_body),
        };

        let (completion, receiver) = oneshot::channel();
        self.tasks.spawn_on(
            deliver(request, completion, self.shutdown.clone()),
            &self.runtime,
        );

        Ok(PendingEvent::new(receiver))
    }
}
