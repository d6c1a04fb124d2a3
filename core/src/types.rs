//! Domain DTOs for the Pockets API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. `ApiResult`
//! is the one UI-facing envelope: the boundary operations always produce it
//! fresh and it is never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A destination bucket for saved items, owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// A saved entry attached to a project. Entries created by this client are
/// always of type "url"; `value` holds the link itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub value: String,
}

/// What the user asked to save: page, link or image, or edited form fields.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub title: String,
    pub url: String,
}

/// Wire body for creating an item.
#[derive(Debug, Serialize)]
pub(crate) struct NewItem<'a> {
    pub title: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: &'a str,
}

/// Uniform outcome of the boundary operations (`save_current_page`,
/// `test_connection`). `message` is rendered to the user as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResult {
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// One page of a project's saved items. `next_page_url` is the server's
/// opaque next-page indicator, passed through untouched; `None` means this
/// is the last page.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub next_page_url: Option<String>,
}
