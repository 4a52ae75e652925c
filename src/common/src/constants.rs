pub const ENVIRONMENTS_PATH_SEGMENT: &str = "environments";
pub const EVENTS_PATH_SEGMENT: &str = "events";
pub const API_VERSION_SEGMENT: &str = "v1";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://api.tesmon.io";

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5000;

pub const ENV_PREFIX: &str = "TESMON";
