use super::error::{EventSendError, EventSendResult};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Resolves exactly once with the raw response body of one event delivery,
/// or with the failure that ended it.
///
/// Dropping it abandons the request.
#[must_use = "an unawaited PendingEvent abandons its request"]
pub struct PendingEvent {
    receiver: oneshot::Receiver<EventSendResult<String>>,
}

impl PendingEvent {
    pub(crate) fn new(receiver: oneshot::Receiver<EventSendResult<String>>) -> Self {
        Self { receiver }
    }

    pub(crate) fn resolved(outcome: EventSendResult<String>) -> Self {
        let (completion, receiver) = oneshot::channel();
        let _ = completion.send(outcome);
        Self { receiver }
    }

    /// Blocks the current thread until the delivery settles.
    ///
    /// Panics when called from within an async execution context.
    pub fn blocking_wait(self) -> EventSendResult<String> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(EventSendError::Cancelled))
    }
}

impl Future for PendingEvent {
    type Output = EventSendResult<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // a completion dropped without a value means the delivery task was lost
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(EventSendError::Cancelled)))
    }
}
