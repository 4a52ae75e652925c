use super::error::ConfigError;
use crate::constants::{
    API_VERSION_SEGMENT, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_PUBLIC_BASE_URL,
    DEFAULT_READ_TIMEOUT_MS, ENVIRONMENTS_PATH_SEGMENT, EVENTS_PATH_SEGMENT,
};
use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Shape of the JSON envelope a target accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `{ "eventKey", "eventBody", "createdAt" }`
    SelfHosted,
    /// `{ "key", "value" }`
    Environment,
}

/// Where events are delivered. Exactly one variant is active per sender.
#[derive(Clone, PartialEq, Eq)]
pub enum Target {
    /// A self-hosted test run engine: `{base_url}/v1/events`
    SelfHosted { base_url: String },
    /// The multi-tenant service: `{base_url}/v1/environments/{environment_id}/events`
    Environment {
        base_url: String,
        environment_id: String,
        api_token: String,
    },
}

impl Target {
    pub fn self_hosted(base_url: impl Into<String>) -> Self {
        Target::SelfHosted {
            base_url: base_url.into(),
        }
    }

    /// Environment target on the public endpoint.
    pub fn environment(environment_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Target::Environment {
            base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            environment_id: environment_id.into(),
            api_token: api_token.into(),
        }
    }

    pub fn with_base_url(mut self, new_base_url: impl Into<String>) -> Self {
        match &mut self {
            Target::SelfHosted { base_url } | Target::Environment { base_url, .. } => {
                *base_url = new_base_url.into();
            }
        }
        self
    }

    pub fn base_url(&self) -> &str {
        match self {
            Target::SelfHosted { base_url } | Target::Environment { base_url, .. } => base_url,
        }
    }

    pub fn api_token(&self) -> Option<&str> {
        match self {
            Target::SelfHosted { .. } => None,
            Target::Environment { api_token, .. } => Some(api_token),
        }
    }

    pub fn wire_format(&self) -> WireFormat {
        match self {
            Target::SelfHosted { .. } => WireFormat::SelfHosted,
            Target::Environment { .. } => WireFormat::Environment,
        }
    }

    /// Checks that every field the active variant needs is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Target::SelfHosted { base_url } => require("base_url", base_url),
            Target::Environment {
                base_url,
                environment_id,
                api_token,
            } => {
                require("environment_id", environment_id)?;
                require("api_token", api_token)?;
                require("base_url", base_url)
            }
        }
    }

    /// Derives the events endpoint, keeping any path prefix of the base URL.
    pub fn events_url(&self) -> Result<Url> {
        let base_url = self.base_url();
        let mut url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL '{}'", base_url))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("Base URL '{}' cannot carry a path", base_url))?;
            segments.pop_if_empty().push(API_VERSION_SEGMENT);
            if let Target::Environment { environment_id, .. } = self {
                segments.push(ENVIRONMENTS_PATH_SEGMENT).push(environment_id);
            }
            segments.push(EVENTS_PATH_SEGMENT);
        }

        Ok(url)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(())
}

// api token stays out of logs
impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::SelfHosted { base_url } => f
                .debug_struct("SelfHosted")
                .field("base_url", base_url)
                .finish(),
            Target::Environment {
                base_url,
                environment_id,
                ..
            } => f
                .debug_struct("Environment")
                .field("base_url", base_url)
                .field("environment_id", environment_id)
                .field("api_token", &"<redacted>")
                .finish(),
        }
    }
}

/// Ceilings applied to every request a sender issues.
///
/// `connect` and `read` each bound one phase on its own: a slow response
/// succeeds as long as no single read stalls past `read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    /// Optional deadline for the whole exchange. Unset unless configured.
    pub request: Option<Duration>,
}

impl Timeouts {
    /// Same ceiling for connect and read, no overall deadline.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            connect: timeout,
            read: timeout,
            request: None,
        }
    }

    pub fn with_request(mut self, request: Duration) -> Self {
        self.request = Some(request);
        self
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            request: None,
        }
    }
}
