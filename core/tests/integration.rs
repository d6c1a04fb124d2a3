//! End-to-end run against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, points a `ConfigStore` in a temp
//! directory at it, and drives every client operation over real HTTP through
//! a ureq `Transport`. Covers the happy path, the auth-failure path, and the
//! structural network-error classification (a port nobody listens on).

use pockets_core::{
    ApiClient, ConfigStore, HttpMethod, HttpRequest, HttpResponse, Project, SettingsPatch,
    Transport, TransportError,
};
use tempfile::TempDir;

const TOKEN: &str = "secret-token";

/// Real transport backed by ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data; only failures without an HTTP response
/// become `TransportError`, matching the trait contract.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match req.method {
            HttpMethod::Get => {
                let mut r = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            HttpMethod::Post => {
                let mut r = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(req.body.as_deref().unwrap_or("").as_bytes())
            }
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers: Vec::new(),
            body,
        })
    }
}

/// Boot the mock server on a random port and return its address.
fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    addr
}

fn configured_client(base_url: &str) -> (TempDir, ApiClient<UreqTransport>) {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join("settings.json"));
    assert!(store.save_all(&SettingsPatch {
        api_token: Some(TOKEN.to_string()),
        selected_project: Some(Project {
            id: 2,
            name: "Reading".to_string(),
        }),
        base_url: Some(base_url.to_string()),
    }));
    (dir, ApiClient::new(store, UreqTransport::new()))
}

#[test]
fn save_and_list_lifecycle() {
    let addr = start_server();
    let (_dir, client) = configured_client(&format!("http://{addr}"));

    // Step 1: the settings page probes connectivity.
    let result = client.test_connection();
    assert!(result.success, "{}", result.message);
    assert_eq!(result.message, "Connection successful!");

    // Step 2: the settings page lists projects.
    let projects = client.get_projects().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().any(|p| p.name == "Reading"));

    // Step 3: the popup saves the current page.
    let result = client.save_current_page("Integration test", "https://example.com/post");
    assert!(result.success, "{}", result.message);
    assert_eq!(result.message, "Saved to Reading");
    let data = result.data.unwrap();
    assert_eq!(data["value"], "https://example.com/post");

    // Step 4: the links page reads the saved item back.
    let page = client.list_items(2, 1).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name.as_deref(), Some("Integration test"));
    assert_eq!(page.items[0].value, "https://example.com/post");
    assert!(page.next_page_url.is_none());
}

#[test]
fn rejected_token_reports_the_auth_sentence() {
    let addr = start_server();
    let (_dir, client) = configured_client(&format!("http://{addr}"));
    assert!(client.store().set_token("wrong"));

    let result = client.test_connection();
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Authentication failed. Please check your API token in settings."
    );
}

#[test]
fn unreachable_server_reports_the_network_sentence() {
    // Bind then drop so the port is known to be closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let (_dir, client) = configured_client(&format!("http://{addr}"));

    let result = client.save_current_page("Title", "https://example.com");
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Network error. Please check your internet connection."
    );
}

#[test]
fn cleared_settings_fail_before_the_network() {
    let addr = start_server();
    let (_dir, client) = configured_client(&format!("http://{addr}"));
    assert!(client.store().clear_all());
    assert!(!client.store().is_configured());

    let result = client.save_current_page("Title", "https://example.com");
    assert!(!result.success);
    assert!(result.message.contains("No project selected"));
}
