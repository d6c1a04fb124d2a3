//! Configuration-gated API client for the Pockets backend.
//!
//! # Design
//! `ApiClient` reads the `ConfigStore` before every call and hands the built
//! request to its `Transport`, so a missing token or project fails before any
//! network traffic exists. All failure modes collapse into `ApiError`, whose
//! Display strings are user-facing sentences; `save_current_page` and
//! `test_connection` are the two boundaries where errors become `ApiResult`
//! data instead of propagating.

use serde_json::Value;

use crate::config::ConfigStore;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ApiResult, Item, ItemPage, NewItem, Project, SaveRequest};

/// Base URL of the hosted Pockets service, used when the store carries no
/// override.
pub const DEFAULT_BASE_URL: &str = "https://pockets.fourorbit.com";

/// Client for the Pockets HTTP API.
pub struct ApiClient<T: Transport> {
    store: ConfigStore,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(store: ConfigStore, transport: T) -> Self {
        Self { store, transport }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// One authenticated round trip. Reads configuration first: no token
    /// means no request is built at all. `extra_headers` override the
    /// defaults by case-insensitive name.
    fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
        extra_headers: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let token = self.store.token().ok_or(ApiError::NotConfigured)?;
        let base = self
            .store
            .base_url()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let url = join_url(&base, endpoint);

        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        for (name, value) in extra_headers {
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => slot.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        log::debug!("{method:?} {url}");
        let response = self.transport.execute(&HttpRequest {
            method,
            url,
            headers,
            body,
        })?;

        if response.status == 401 {
            return Err(ApiError::AuthFailed);
        }
        if !response.is_success() {
            return Err(ApiError::Server {
                status: response.status,
                message: server_message(&response),
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// List the projects available to this token. Accepts both the `data`
    /// envelope and the bare-array form of the response.
    pub fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let body = self.request(HttpMethod::Get, "/api/projects", None, &[])?;
        serde_json::from_value(unwrap_envelope(body))
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Save one link into a project. The raw server response is returned
    /// verbatim; callers that want an `ApiResult` go through
    /// `save_current_page`.
    pub fn save_link(&self, project_id: i64, link: &SaveRequest) -> Result<Value, ApiError> {
        if project_id <= 0 {
            return Err(ApiError::NoProjectSelected);
        }
        let body = serde_json::to_string(&NewItem {
            title: &link.title,
            kind: "url",
            value: &link.url,
        })
        .map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.request(
            HttpMethod::Post,
            &format!("/api/projects/{project_id}/items"),
            Some(body),
            &[],
        )
    }

    /// Save the given page to the previously selected project. Never raises:
    /// this is the boundary where every failure becomes `ApiResult` data for
    /// the popup and the context-menu handler to render.
    pub fn save_current_page(&self, title: &str, url: &str) -> ApiResult {
        match self.save_page_inner(title, url) {
            Ok((project, data)) => {
                ApiResult::ok(format!("Saved to {}", project.name), Some(data))
            }
            Err(e) => ApiResult::err(e.to_string()),
        }
    }

    fn save_page_inner(&self, title: &str, url: &str) -> Result<(Project, Value), ApiError> {
        let project = self
            .store
            .selected_project()
            .ok_or(ApiError::NoProjectSelected)?;
        // Pages without a <title> are saved under their URL.
        let title = if title.is_empty() { url } else { title };
        let data = self.save_link(
            project.id,
            &SaveRequest {
                title: title.to_string(),
                url: url.to_string(),
            },
        )?;
        Ok((project, data))
    }

    /// Connectivity probe for the settings page: lists projects and discards
    /// the payload. Never raises.
    pub fn test_connection(&self) -> ApiResult {
        if self.store.token().is_none() {
            return ApiResult::err("Please enter API key");
        }
        match self.get_projects() {
            Ok(_) => ApiResult::ok("Connection successful!", None),
            Err(e) => ApiResult::err(e.to_string()),
        }
    }

    /// One page of a project's saved items, for the links page. The server's
    /// `next_page_url` is passed through opaquely.
    pub fn list_items(&self, project_id: i64, page: u32) -> Result<ItemPage, ApiError> {
        if project_id <= 0 {
            return Err(ApiError::NoProjectSelected);
        }
        let body = self.request(
            HttpMethod::Get,
            &format!("/api/projects/{project_id}/items?page={page}"),
            None,
            &[],
        )?;
        let next_page_url = body
            .get("next_page_url")
            .and_then(Value::as_str)
            .map(str::to_string);
        let items: Vec<Item> = serde_json::from_value(unwrap_envelope(body))
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(ItemPage {
            items,
            next_page_url,
        })
    }
}

/// Join base and endpoint with exactly one slash between them, whatever the
/// inputs carry.
fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// The backend wraps list responses in a `data` envelope; older deployments
/// return the bare array.
fn unwrap_envelope(mut body: Value) -> Value {
    match body.get_mut("data") {
        Some(data) => data.take(),
        None => body,
    }
}

/// Prefer the server's JSON `message` field; fall back to the status text,
/// then to a generic sentence for responses that carry neither.
fn server_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            if response.status_text.is_empty() {
                format!("Request failed with status {}", response.status)
            } else {
                response.status_text.clone()
            }
        })
}
