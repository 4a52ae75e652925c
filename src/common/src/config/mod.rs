mod config_loader;
mod defaults;
mod error;
mod target;

pub use config_loader::{Config, ConfigLoader};
pub use error::ConfigError;
pub use target::{Target, Timeouts, WireFormat};
