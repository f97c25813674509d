use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use stagecraft_catalog::gallery::MoveDirection;
use stagecraft_core::repository::VersionedGallery;
use stagecraft_shared::models::events::{
    DomainEvent, GalleryImageAttachedEvent, GalleryImageDeletedEvent, GalleryReorderedEvent,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/admin/inventory/{id}/images",
            get(list_images).post(attach_image),
        )
        .route("/v1/admin/inventory/{id}/images/move", post(move_image))
        .route(
            "/v1/admin/inventory/{id}/images/{image_id}",
            delete(delete_image),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MoveImageRequest {
    /// 1-indexed position of the image to move
    pub position: usize,
    pub direction: MoveDirection,
    /// Gallery version the client last observed
    pub version: i64,
}

#[derive(Debug, Deserialize)]
pub struct AttachImageRequest {
    pub source: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteImageQuery {
    pub version: i64,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub item_id: Uuid,
    pub version: i64,
    pub images: Vec<GalleryImageResponse>,
}

#[derive(Debug, Serialize)]
pub struct GalleryImageResponse {
    pub id: Option<Uuid>,
    pub position: usize,
    pub source: String,
    pub label: String,
    pub is_main: bool,
}

fn gallery_response(item_id: Uuid, versioned: VersionedGallery) -> GalleryResponse {
    GalleryResponse {
        item_id,
        version: versioned.version,
        images: versioned
            .gallery
            .images()
            .iter()
            .enumerate()
            .map(|(index, image)| GalleryImageResponse {
                id: image.id,
                position: index + 1,
                source: image.source.clone(),
                label: image.label.clone(),
                is_main: image.is_main,
            })
            .collect(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/admin/inventory/{id}/images
/// The item's gallery in display order
async fn list_images(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<GalleryResponse>, AppError> {
    let versioned = state.gallery_store.fetch_gallery(item_id).await?;
    Ok(Json(gallery_response(item_id, versioned)))
}

/// POST /v1/admin/inventory/{id}/images/move
/// Swap an image with its circular neighbor and return the refreshed gallery
async fn move_image(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<MoveImageRequest>,
) -> Result<Json<GalleryResponse>, AppError> {
    let versioned = state.gallery_store.fetch_gallery(item_id).await?;
    if versioned.version != req.version {
        return Err(AppError::ConflictError(format!(
            "Gallery changed concurrently: expected version {}, found {}",
            req.version, versioned.version
        )));
    }

    // The in-memory gallery validates the move and resolves the wraparound
    // target; the store then applies the same transposition atomically.
    let mut gallery = versioned.gallery;
    let applied = gallery.move_image(req.position, req.direction)?;

    if applied.from != applied.to {
        state
            .gallery_store
            .swap_positions(item_id, applied.from, applied.to, req.version)
            .await?;
    }

    let refreshed = state.gallery_store.fetch_gallery(item_id).await?;
    state
        .events
        .publish(DomainEvent::GalleryReordered(GalleryReorderedEvent {
            item_id,
            moved_from: applied.from,
            moved_to: applied.to,
            gallery_version: refreshed.version,
            timestamp: Utc::now().timestamp(),
        }));

    Ok(Json(gallery_response(item_id, refreshed)))
}

/// DELETE /v1/admin/inventory/{id}/images/{image_id}
/// Remove an extra image; positions above it close ranks
async fn delete_image(
    State(state): State<AppState>,
    Path((item_id, image_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<DeleteImageQuery>,
) -> Result<Json<GalleryResponse>, AppError> {
    let versioned = state.gallery_store.fetch_gallery(item_id).await?;
    if versioned.version != query.version {
        return Err(AppError::ConflictError(format!(
            "Gallery changed concurrently: expected version {}, found {}",
            query.version, versioned.version
        )));
    }

    // Rejects main-image deletion and unknown ids before any store write
    let mut gallery = versioned.gallery;
    gallery.delete_image(image_id)?;

    state
        .gallery_store
        .delete_image(item_id, image_id, query.version)
        .await?;

    let refreshed = state.gallery_store.fetch_gallery(item_id).await?;
    state
        .events
        .publish(DomainEvent::GalleryImageDeleted(GalleryImageDeletedEvent {
            item_id,
            image_id,
            gallery_version: refreshed.version,
            timestamp: Utc::now().timestamp(),
        }));

    Ok(Json(gallery_response(item_id, refreshed)))
}

/// POST /v1/admin/inventory/{id}/images
/// Attach an uploaded image reference at the end of the gallery
async fn attach_image(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<AttachImageRequest>,
) -> Result<Json<GalleryResponse>, AppError> {
    if req.source.trim().is_empty() {
        return Err(AppError::ValidationError("source is required".to_string()));
    }

    let image = state
        .gallery_store
        .attach_image(item_id, &req.source, &req.label)
        .await?;

    let refreshed = state.gallery_store.fetch_gallery(item_id).await?;
    state
        .events
        .publish(DomainEvent::GalleryImageAttached(GalleryImageAttachedEvent {
            item_id,
            image_id: image.id.unwrap_or_default(),
            position: refreshed.gallery.len(),
            timestamp: Utc::now().timestamp(),
        }));

    Ok(Json(gallery_response(item_id, refreshed)))
}
