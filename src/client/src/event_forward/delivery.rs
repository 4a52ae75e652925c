use super::error::{EventSendError, EventSendResult};
use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tesmon_common::constants::{API_KEY_HEADER, JSON_CONTENT_TYPE};
use tesmon_common::{EventEnvelope, Target};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// One outbound event, owned by the task that delivers it.
pub(crate) struct EventRequest {
    pub client: Client,
    pub target: Target,
    pub envelope: EventEnvelope,
}

/// Drive a single delivery and settle `completion` with its outcome.
///
/// Exactly one of shutdown, caller abandonment or the HTTP exchange ends the
/// task; only the first and last produce a value.
pub(crate) async fn deliver(
    request: EventRequest,
    mut completion: oneshot::Sender<EventSendResult<String>>,
    shutdown: CancellationToken,
) {
    let event_key = request.envelope.event_key().to_string();

    let outcome = tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
            debug!("Sender shut down, cancelling event {}", event_key);
            Err(EventSendError::Cancelled)
        }
        _ = completion.closed() => {
            debug!("Pending event {} dropped, abandoning request", event_key);
            return;
        }
        outcome = send_request(&request) => outcome,
    };

    if let Err(EventSendError::Dispatch(e)) = &outcome {
        error!("Failed to send event {}. Exception: {:#}", event_key, e);
    }

    if completion.send(outcome).is_err() {
        debug!("Pending event {} dropped before it resolved", event_key);
    }
}

/// Send a single HTTP request, no retries
async fn send_request(request: &EventRequest) -> EventSendResult<String> {
    let start_time = Instant::now();
    let event_key = request.envelope.event_key();

    let url = request.target.events_url()?;
    let body = request
        .envelope
        .to_json_bytes()
        .context("Failed to serialize event")?;

    debug!("Sending event {} to {}", event_key, url);

    let mut builder = request
        .client
        .post(url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(body);

    if let Some(api_token) = request.target.api_token() {
        builder = builder.header(API_KEY_HEADER, api_token);
    }

    let response = builder
        .send()
        .await
        .map_err(EventSendError::from_transport)?;

    let status = response.status();
    let response_text = response.text().await.map_err(EventSendError::from_body)?;

    if status != StatusCode::OK {
        warn!(
            "Failed to send event {}. HTTP status code: {}, body: {}",
            event_key,
            status.as_u16(),
            response_text
        );
    }

    debug!(
        "Event {} answered with {}, elapsed: {:?}",
        event_key,
        status,
        start_time.elapsed()
    );

    Ok(response_text)
}
