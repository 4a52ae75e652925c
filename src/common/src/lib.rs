pub mod config;
pub mod constants;
pub mod event;

pub use config::{Config, ConfigError, ConfigLoader, Target, Timeouts, WireFormat};
pub use event::EventEnvelope;
