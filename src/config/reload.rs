use std::path::Path;

use notify::{Config as NotifyConfig, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::app_context::AppContext;

use super::{RuntimeConfig, load_config};

/// Watches the config file and swaps the runtime-tunable subset on change.
/// The scheduler worker picks the new values up on its next tick; a changed
/// monitored URL re-arms the web watcher there. Invalid files are ignored.
pub fn start_config_hot_reload_job(app_context: AppContext) {
    tokio::spawn(async move {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let config_path = app_context.config_path.clone();
        let mut watcher = match RecommendedWatcher::new(
            move |result| {
                let _ = tx.send(result);
            },
            NotifyConfig::default(),
        ) {
            Ok(watcher) => watcher,
            Err(error) => {
                log::warn!("config hot-reload disabled: watcher init failed: {}", error);
                return;
            }
        };

        if let Err(error) =
            watcher.watch(Path::new(config_path.as_str()), RecursiveMode::NonRecursive)
        {
            log::warn!(
                "config hot-reload disabled: failed to watch {}: {}",
                config_path,
                error
            );
            return;
        }

        while let Some(event_result) = rx.recv().await {
            let event = match event_result {
                Ok(event) => event,
                Err(error) => {
                    log::warn!("config hot-reload event error: {}", error);
                    continue;
                }
            };

            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
            ) {
                continue;
            }

            match load_config(config_path.as_str()) {
                Ok(new_config) => {
                    let runtime_config = RuntimeConfig::from_config(&new_config);
                    app_context
                        .update_runtime_config(runtime_config.clone())
                        .await;
                    log::info!(
                        "config_hot_reload_applied alarm_hour={} web_check_url={} web_check_interval_secs={}",
                        runtime_config.alarm_hour,
                        runtime_config.web_check.url,
                        runtime_config.web_check.interval_secs,
                    );
                }
                Err(error) => {
                    log::warn!("config hot-reload ignored invalid config: {}", error);
                }
            }
        }
    });
}
