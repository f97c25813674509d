use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use stagecraft_catalog::item::{InventoryItem, ItemCategory};
use stagecraft_shared::models::events::{DomainEvent, InventoryAction, InventoryChangedEvent};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/inventory", post(create_item).get(list_items))
        .route(
            "/v1/admin/inventory/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub main_image_source: String,
    pub main_image_label: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub is_available: bool,
    pub main_image_source: String,
    pub main_image_label: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<ItemCategory>,
    #[serde(default)]
    pub available_only: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/admin/inventory
/// Add an item to the staging catalog
async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::ValidationError("name is required".to_string()));
    }

    let mut item = InventoryItem::new(
        req.name,
        req.description,
        req.category,
        req.main_image_source,
        req.main_image_label,
    );
    if let Some(metadata) = req.metadata {
        item.metadata = metadata;
    }

    state.inventory_repo.create_item(&item).await?;
    publish_change(&state, item.id, InventoryAction::Created);

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /v1/admin/inventory
/// List catalog items, optionally filtered
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = state
        .inventory_repo
        .list_items(query.category.as_ref(), query.available_only)
        .await?;
    Ok(Json(items))
}

/// GET /v1/admin/inventory/{id}
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItem>, AppError> {
    let item = state
        .inventory_repo
        .get_item(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Inventory item not found: {}", id)))?;
    Ok(Json(item))
}

/// PUT /v1/admin/inventory/{id}
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<InventoryItem>, AppError> {
    let mut item = state
        .inventory_repo
        .get_item(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Inventory item not found: {}", id)))?;

    item.name = req.name;
    item.description = req.description;
    item.category = req.category;
    item.is_available = req.is_available;
    item.main_image_source = req.main_image_source;
    item.main_image_label = req.main_image_label;
    if let Some(metadata) = req.metadata {
        item.metadata = metadata;
    }
    item.updated_at = Utc::now();

    state.inventory_repo.update_item(&item).await?;
    publish_change(&state, item.id, InventoryAction::Updated);

    Ok(Json(item))
}

/// DELETE /v1/admin/inventory/{id}
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.inventory_repo.delete_item(id).await?;
    publish_change(&state, id, InventoryAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}

fn publish_change(state: &AppState, item_id: Uuid, action: InventoryAction) {
    state
        .events
        .publish(DomainEvent::InventoryChanged(InventoryChangedEvent {
            item_id,
            action,
            timestamp: Utc::now().timestamp(),
        }));
}
