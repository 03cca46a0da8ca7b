mod defaults;
mod io;
mod reload;
mod schema;
mod validate;

#[cfg(test)]
mod tests;

pub use io::load_config;
pub use reload::start_config_hot_reload_job;
pub use schema::{Config, Relay, RuntimeConfig, Simulation, TelegramConfig, WebCheckConfig};
pub use validate::ConfigError;
