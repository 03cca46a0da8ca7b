mod probe;

#[cfg(test)]
mod tests;

pub use probe::{HttpPageProbe, WatchError};
pub(crate) use probe::PageProbe;

use crate::config::WebCheckConfig;
use crate::dispatch::Dispatcher;

/// One-shot watcher for a single monitored page. Armed at startup when a
/// URL is configured; fires at most one alert and then stays disarmed until
/// the process restarts or a reload changes the URL.
pub struct WebWatcher {
    config: WebCheckConfig,
    armed_url: Option<String>,
}

impl WebWatcher {
    pub fn new(config: WebCheckConfig) -> Self {
        let armed_url = (!config.url.is_empty()).then(|| config.url.clone());
        Self { config, armed_url }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_url.is_some()
    }

    pub fn monitored_url(&self) -> Option<&str> {
        self.armed_url.as_deref()
    }

    /// Applies a hot-reloaded web-check block. A changed URL re-arms (or
    /// disarms, when emptied) the watcher; selector and placeholder updates
    /// take effect either way.
    pub fn apply_config(&mut self, fresh: &WebCheckConfig) {
        if fresh.url != self.config.url {
            log::info!(
                "monitored url reconfigured from {:?} to {:?}",
                self.config.url,
                fresh.url
            );
            self.armed_url = (!fresh.url.is_empty()).then(|| fresh.url.clone());
        }
        self.config = fresh.clone();
    }

    /// One watch cycle: fetch, extract, compare against the placeholder.
    /// Disarms only after the change alert went out on both channels; a
    /// dispatch failure keeps the watcher armed for the next cadence.
    pub(crate) async fn check<P: PageProbe>(
        &mut self,
        probe: &P,
        dispatcher: &Dispatcher,
    ) -> Result<(), WatchError> {
        let Some(url) = self.armed_url.clone() else {
            return Ok(());
        };
        log::info!("check url for {}", url);

        let extracted = probe.extract(&url, &self.config.selector).await?;
        if extracted.contains(&self.config.placeholder) {
            log::info!("site checked, no change detected");
            return Ok(());
        }

        log::info!("site has changed to: {}", extracted);
        match dispatcher.dispatch_web_changed(&url).await {
            Ok(()) => {
                self.armed_url = None;
                log::info!("web change alert sent, watcher disarmed");
            }
            Err(error) => {
                log::warn!("web change dispatch failed, watcher stays armed: {}", error);
            }
        }
        Ok(())
    }
}
