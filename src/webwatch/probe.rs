use scraper::{Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("fetch failed for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error("invalid selector: {0}")]
    Selector(String),
    #[error("selector matched nothing at {0}")]
    NoMatch(String),
}

/// Seam between the watcher decision logic and the actual page fetch, so
/// tests can feed canned extractions.
pub(crate) trait PageProbe {
    async fn extract(&self, url: &str, selector: &str) -> Result<String, WatchError>;
}

pub struct HttpPageProbe {
    client: reqwest::Client,
}

impl HttpPageProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl PageProbe for HttpPageProbe {
    async fn extract(&self, url: &str, selector: &str) -> Result<String, WatchError> {
        let fetch_error = |source| WatchError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(fetch_error)?;
        let body = response
            .error_for_status()
            .map_err(fetch_error)?
            .text()
            .await
            .map_err(fetch_error)?;
        extract_selector_text(&body, selector, url)
    }
}

pub(crate) fn extract_selector_text(
    html: &str,
    selector: &str,
    url: &str,
) -> Result<String, WatchError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(selector).map_err(|error| WatchError::Selector(error.to_string()))?;
    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| WatchError::NoMatch(url.to_string()))?;
    Ok(element.text().collect::<String>())
}
