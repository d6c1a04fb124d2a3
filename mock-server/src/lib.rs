use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Items per page of `GET /api/projects/{id}/items`.
pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

pub struct AppState {
    token: String,
    db: RwLock<Db>,
}

#[derive(Default)]
struct Db {
    projects: Vec<Project>,
    items: HashMap<i64, Vec<Item>>,
    next_item_id: i64,
}

/// Build the router with two seeded projects and the bearer token every
/// request must present.
pub fn app(token: &str) -> Router {
    let state = Arc::new(AppState {
        token: token.to_string(),
        db: RwLock::new(Db {
            projects: vec![
                Project {
                    id: 1,
                    name: "Inbox".to_string(),
                },
                Project {
                    id: 2,
                    name: "Reading".to_string(),
                },
            ],
            items: HashMap::new(),
            next_item_id: 1,
        }),
    });
    Router::new()
        .route("/api/projects", get(list_projects))
        .route(
            "/api/projects/{project_id}/items",
            get(list_items).post(create_item),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

type ApiRejection = (StatusCode, Json<Value>);

/// Laravel-style 401 envelope on a missing or mismatched bearer token.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiRejection> {
    let expected = format!("Bearer {}", state.token);
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if presented == expected {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthenticated."})),
        ))
    }
}

fn project_not_found() -> ApiRejection {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Project not found."})),
    )
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiRejection> {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    Ok(Json(json!({ "data": &db.projects })))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), ApiRejection> {
    authorize(&state, &headers)?;
    let mut db = state.db.write().await;
    if !db.projects.iter().any(|p| p.id == project_id) {
        return Err(project_not_found());
    }
    let item = Item {
        id: db.next_item_id,
        name: input.title,
        kind: input.kind,
        value: input.value,
    };
    db.next_item_id += 1;
    db.items.entry(project_id).or_default().push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Query(pagination): Query<Pagination>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiRejection> {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    if !db.projects.iter().any(|p| p.id == project_id) {
        return Err(project_not_found());
    }
    let all = db.items.get(&project_id).map(Vec::as_slice).unwrap_or(&[]);
    let page = pagination.page.max(1);
    let start = (page - 1) * PAGE_SIZE;
    let slice = all.get(start..).unwrap_or(&[]);
    let page_items = &slice[..slice.len().min(PAGE_SIZE)];
    let next_page_url = if start + page_items.len() < all.len() {
        Value::String(format!("/api/projects/{project_id}/items?page={}", page + 1))
    } else {
        Value::Null
    };
    Ok(Json(json!({
        "data": page_items,
        "next_page_url": next_page_url,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_with_a_type_field() {
        let item = Item {
            id: 1,
            name: "Test".to_string(),
            kind: "url".to_string(),
            value: "https://example.com".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "url");
        assert_eq!(json["value"], "https://example.com");
    }

    #[test]
    fn create_item_requires_title_and_value() {
        let result: Result<CreateItem, _> = serde_json::from_str(r#"{"type":"url"}"#);
        assert!(result.is_err());

        let input: CreateItem = serde_json::from_str(
            r#"{"title":"T","type":"url","value":"https://example.com"}"#,
        )
        .unwrap();
        assert_eq!(input.title, "T");
        assert_eq!(input.kind, "url");
    }

    #[test]
    fn pagination_defaults_to_page_one() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, 1);
    }
}
