use std::cell::{Cell, RefCell};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{Config, Relay, Simulation, TelegramConfig, WebCheckConfig};
use crate::dispatch::Dispatcher;

use super::probe::{HttpPageProbe, PageProbe, WatchError, extract_selector_text};
use super::WebWatcher;

const PLACEHOLDER: &str = "Check back soon for entry details on this race";

struct MockProbe {
    responses: RefCell<Vec<Result<String, WatchError>>>,
    calls: Cell<usize>,
}

impl MockProbe {
    fn new(responses: Vec<Result<String, WatchError>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            calls: Cell::new(0),
        }
    }
}

impl PageProbe for MockProbe {
    async fn extract(&self, _url: &str, _selector: &str) -> Result<String, WatchError> {
        self.calls.set(self.calls.get() + 1);
        self.responses.borrow_mut().remove(0)
    }
}

fn watch_config(url: &str) -> WebCheckConfig {
    WebCheckConfig {
        url: url.to_string(),
        selector: "main p.status".to_string(),
        placeholder: PLACEHOLDER.to_string(),
        interval_secs: 6 * 60 * 60,
    }
}

fn simulate_dispatcher() -> Dispatcher {
    let config = Config {
        data_file: "data/ricorrenze.json".to_string(),
        email_to: "target@example.com".to_string(),
        alarm_hour: 9,
        poll_interval_secs: 60,
        debug: false,
        relay: Relay {
            host: "relay.example.com:465".to_string(),
            user: "relay-user".to_string(),
            secret: "relay-secret".to_string(),
            mail: "sender@example.com".to_string(),
        },
        telegram: TelegramConfig {
            bot_token: "123456:TEST".to_string(),
            chat_id: 42,
        },
        web_check: WebCheckConfig::default(),
        simulation: Simulation { enabled: true },
    };
    Dispatcher::new(&config, true)
}

#[tokio::test]
async fn placeholder_text_means_no_change_and_stays_armed() {
    let mut watcher = WebWatcher::new(watch_config("https://example.com/race"));
    let probe = MockProbe::new(vec![Ok(format!("Entries: {}", PLACEHOLDER))]);
    let dispatcher = simulate_dispatcher();

    watcher.check(&probe, &dispatcher).await.expect("check");
    assert!(watcher.is_armed());
    assert_eq!(probe.calls.get(), 1);
}

#[tokio::test]
async fn changed_text_fires_exactly_once_then_disarms() {
    let mut watcher = WebWatcher::new(watch_config("https://example.com/race"));
    let probe = MockProbe::new(vec![Ok("Entries are open!".to_string())]);
    let dispatcher = simulate_dispatcher();

    watcher.check(&probe, &dispatcher).await.expect("first check");
    assert!(!watcher.is_armed());

    // a second cycle is a no-op: the probe is not consulted again
    watcher.check(&probe, &dispatcher).await.expect("second check");
    assert_eq!(probe.calls.get(), 1);
}

#[tokio::test]
async fn unconfigured_watcher_is_a_no_op() {
    let mut watcher = WebWatcher::new(WebCheckConfig::default());
    let probe = MockProbe::new(vec![]);
    let dispatcher = simulate_dispatcher();

    assert!(!watcher.is_armed());
    watcher.check(&probe, &dispatcher).await.expect("check");
    assert_eq!(probe.calls.get(), 0);
}

#[tokio::test]
async fn probe_failure_surfaces_and_keeps_watcher_armed() {
    let mut watcher = WebWatcher::new(watch_config("https://example.com/race"));
    let probe = MockProbe::new(vec![Err(WatchError::NoMatch(
        "https://example.com/race".to_string(),
    ))]);
    let dispatcher = simulate_dispatcher();

    let result = watcher.check(&probe, &dispatcher).await;
    assert!(matches!(result, Err(WatchError::NoMatch(_))));
    assert!(watcher.is_armed());
}

#[tokio::test]
async fn reconfigured_url_rearms_a_disarmed_watcher() {
    let mut watcher = WebWatcher::new(watch_config("https://example.com/race"));
    let probe = MockProbe::new(vec![Ok("Entries are open!".to_string())]);
    let dispatcher = simulate_dispatcher();

    watcher.check(&probe, &dispatcher).await.expect("check");
    assert!(!watcher.is_armed());

    // same URL again: stays disarmed
    watcher.apply_config(&watch_config("https://example.com/race"));
    assert!(!watcher.is_armed());

    watcher.apply_config(&watch_config("https://example.com/other-race"));
    assert_eq!(watcher.monitored_url(), Some("https://example.com/other-race"));
}

#[test]
fn selector_extraction_finds_first_matching_element() {
    let html = r#"<html><body><main>
        <p class="status">Check back soon for entry details on this race</p>
        <p class="status">second</p>
    </main></body></html>"#;
    let text =
        extract_selector_text(html, "main p.status", "https://example.com").expect("extract");
    assert!(text.contains("Check back soon"));
}

#[test]
fn selector_miss_is_reported_as_no_match() {
    let html = "<html><body><p>nothing here</p></body></html>";
    let result = extract_selector_text(html, "main p.status", "https://example.com");
    assert!(matches!(result, Err(WatchError::NoMatch(_))));
}

#[tokio::test]
async fn http_probe_extracts_selected_text() {
    let server = MockServer::start().await;
    let html = format!(
        r#"<html><body><main><p class="status">{}</p></main></body></html>"#,
        PLACEHOLDER
    );
    Mock::given(method("GET"))
        .and(path("/race"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let probe = HttpPageProbe::new();
    let text = probe
        .extract(&format!("{}/race", server.uri()), "main p.status")
        .await
        .expect("extract");
    assert!(text.contains(PLACEHOLDER));
}

#[tokio::test]
async fn http_probe_maps_status_errors_to_fetch_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/race"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probe = HttpPageProbe::new();
    let result = probe
        .extract(&format!("{}/race", server.uri()), "main p.status")
        .await;
    assert!(matches!(result, Err(WatchError::Fetch { .. })));
}
