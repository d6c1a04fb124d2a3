//! Client core for the Pockets browser extension.
//!
//! # Overview
//! Two components, in dependency order: `ConfigStore`, the sole owner of the
//! persisted API token, selected project, and optional base-URL override; and
//! `ApiClient`, which turns stored credentials plus a project selection into
//! authenticated HTTP calls and collapses every failure mode into a single
//! user-renderable surface.
//!
//! # Design
//! - The client never performs I/O itself: HTTP round trips go through the
//!   `Transport` trait and configuration reads go through `ConfigStore`, so
//!   both seams can be mocked and every "fails before any network call"
//!   guarantee can be verified with a call counter.
//! - `save_current_page` and `test_connection` are the error-to-value
//!   boundaries: they return `ApiResult` and never raise. Everything else
//!   propagates `ApiError`.
//! - UI glue (popup, settings, links page, context menu) consumes this crate
//!   and renders `ApiResult.message` verbatim, so every error Display string
//!   is a short actionable sentence.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use config::{ConfigError, ConfigStore, Settings, SettingsPatch, Validation};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use types::{ApiResult, Item, ItemPage, Project, SaveRequest};
