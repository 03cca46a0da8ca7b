use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{Config, RuntimeConfig};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub config_path: String,
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,
}

impl AppContext {
    pub fn new(config: Config, config_path: impl Into<String>) -> Self {
        let runtime_config = RuntimeConfig::from_config(&config);
        Self {
            config,
            config_path: config_path.into(),
            runtime_config: Arc::new(RwLock::new(runtime_config)),
        }
    }

    pub async fn update_runtime_config(&self, runtime_config: RuntimeConfig) {
        *self.runtime_config.write().await = runtime_config;
    }
}
