use std::fmt;

/// Terminal failures of a single event delivery.
///
/// A non-2XX response is not one of them: the server's body is handed back
/// as a successful outcome.
#[derive(Debug)]
pub enum EventSendError {
    /// Connection could not be established (refused, DNS failure, ...)
    Connect(reqwest::Error),

    /// The connect, read or configured overall timeout elapsed
    Timeout(reqwest::Error),

    /// Any other transport failure
    Network(reqwest::Error),

    /// The response arrived but its body could not be read
    Body(reqwest::Error),

    /// The request could not be built or dispatched
    Dispatch(anyhow::Error),

    /// The sender abandoned the exchange before it settled
    Cancelled,
}

impl fmt::Display for EventSendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSendError::Connect(e) => write!(f, "Connection failed: {}", e),
            EventSendError::Timeout(e) => write!(f, "Request timed out: {}", e),
            EventSendError::Network(e) => write!(f, "Network request failed: {}", e),
            EventSendError::Body(e) => write!(f, "Failed to read response body: {}", e),
            EventSendError::Dispatch(e) => write!(f, "Failed to dispatch event: {:#}", e),
            EventSendError::Cancelled => write!(f, "Event delivery was cancelled"),
        }
    }
}

impl std::error::Error for EventSendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventSendError::Connect(e)
            | EventSendError::Timeout(e)
            | EventSendError::Network(e)
            | EventSendError::Body(e) => Some(e),
            EventSendError::Dispatch(e) => Some(e.as_ref()),
            EventSendError::Cancelled => None,
        }
    }
}

impl From<anyhow::Error> for EventSendError {
    fn from(err: anyhow::Error) -> Self {
        EventSendError::Dispatch(err)
    }
}

impl EventSendError {
    /// Classify an error raised while sending the request and awaiting headers
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EventSendError::Timeout(err)
        } else if err.is_connect() {
            EventSendError::Connect(err)
        } else if err.is_builder() {
            EventSendError::Dispatch(err.into())
        } else {
            EventSendError::Network(err)
        }
    }

    /// Classify an error raised while reading the response body
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EventSendError::Timeout(err)
        } else {
            EventSendError::Body(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, EventSendError::Timeout(_))
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, EventSendError::Connect(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, EventSendError::Cancelled)
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            EventSendError::Connect(_) => "Could not connect to the Tesmon service".to_string(),
            EventSendError::Timeout(_) => "The Tesmon service did not answer in time".to_string(),
            EventSendError::Network(_) => {
                "Network connection failed while sending the event".to_string()
            }
            EventSendError::Body(_) => "The Tesmon response could not be read".to_string(),
            EventSendError::Dispatch(_) => "The event request could not be prepared".to_string(),
            EventSendError::Cancelled => "Sending the event was cancelled".to_string(),
        }
    }
}

/// Result type for event delivery
pub type EventSendResult<T> = Result<T, EventSendError>;
