//! # Item HTTP Routes
//!
//! The five CRUD endpoints over the items collection. Each handler is a
//! direct translation of one request into one or two store calls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::store::{next_identifier, Item, ItemPatch, ItemStore, NewItem};

use super::errors::{ApiError, ApiResult, MessageResponse};

// ==================
// Shared State
// ==================

/// Item state shared across handlers
pub struct ItemState {
    pub store: ItemStore,
}

impl ItemState {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub gender: String,
    pub item_label: String,
    #[serde(default)]
    pub currency_amount: Option<String>,
    pub quantity_label: String,
}

/// Update body. Every field is optional on the wire, but all five are
/// applied unconditionally: leaving one out erases the stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub item_label: Option<String>,
    #[serde(default)]
    pub currency_amount: Option<String>,
    #[serde(default)]
    pub quantity_label: Option<String>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(request: UpdateItemRequest) -> Self {
        Self {
            name: request.name,
            gender: request.gender,
            item_label: request.item_label,
            currency_amount: request.currency_amount,
            quantity_label: request.quantity_label,
        }
    }
}

/// Wire shape of one item: storage key as hex, timestamp as RFC 3339
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    #[serde(rename = "_id")]
    pub key: String,
    pub id: i64,
    pub name: Option<String>,
    pub gender: String,
    pub item_label: String,
    pub currency_amount: String,
    pub quantity_label: String,
    pub created_at: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            key: item.key.map(|key| key.to_hex()).unwrap_or_default(),
            id: item.id,
            name: item.name,
            gender: item.gender,
            item_label: item.item_label,
            currency_amount: item.currency_amount,
            quantity_label: item.quantity_label,
            created_at: item
                .created_at
                .to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

// ==================
// Item Routes
// ==================

/// Create item routes
pub fn item_routes(state: Arc<ItemState>) -> Router {
    Router::new()
        .route("/items", get(list_items_handler))
        .route("/items", post(create_item_handler))
        .route("/items/{key}", get(get_item_handler))
        .route("/items/{key}", put(update_item_handler))
        .route("/items/{key}", delete(delete_item_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_items_handler(
    State(state): State<Arc<ItemState>>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state.store.list_all().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

async fn get_item_handler(
    State(state): State<Arc<ItemState>>,
    Path(key): Path<String>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.store.get_by_key(&key).await?;
    Ok(Json(item.into()))
}

/// Create an item. The identifier is read-then-write: concurrent creates
/// can compute the same value, and the unique index fails the loser.
async fn create_item_handler(
    State(state): State<Arc<ItemState>>,
    Json(request): Json<CreateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let max = state.store.max_identifier().await?;
    let item = state
        .store
        .insert(NewItem {
            id: next_identifier(max),
            name: request.name,
            gender: request.gender,
            item_label: request.item_label,
            currency_amount: request.currency_amount.unwrap_or_default(),
            quantity_label: request.quantity_label,
        })
        .await?;
    Ok(Json(item.into()))
}

async fn update_item_handler(
    State(state): State<Arc<ItemState>>,
    Path(key): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.store.update_by_key(&key, &request.into()).await?;
    Ok(Json(item.into()))
}

async fn delete_item_handler(
    State(state): State<Arc<ItemState>>,
    Path(key): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    // Only delete validates key shape up front
    if !ItemStore::is_valid_key(&key) {
        return Err(ApiError::InvalidItemId);
    }
    state.store.delete_by_key(&key).await?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
