use crate::config::Config;
use crate::constants::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS};

impl Default for Config {
    fn default() -> Self {
        Self {
            tre_base_url: None,
            base_url: None,
            environment_id: None,
            api_token: None,

            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            request_timeout_ms: None,
        }
    }
}
