use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body accepted by create and update. Any `id` or timestamps the client
/// echoes back are ignored.
#[derive(Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Store {
    items: BTreeMap<i64, Item>,
    last_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/health", get(health))
        .route("/api/items/search", get(search_items))
        .route("/api/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn validate(input: &ItemInput) -> Result<(), StatusCode> {
    if input.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn search_items(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Item>> {
    let needle = params.name.to_lowercase();
    let store = db.read().await;
    Json(
        store
            .items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    validate(&input)?;
    let mut store = db.write().await;
    store.last_id += 1;
    let stamp = now();
    let item = Item {
        id: store.last_id,
        name: input.name,
        description: input.description,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    store.items.insert(item.id, item.clone());
    debug!(id = item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, StatusCode> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, StatusCode> {
    validate(&input)?;
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.name = input.name;
    item.description = input.description;
    item.updated_at = now();
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.items.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    debug!(id = removed.id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> &'static str {
    "Backend is running!"
}
