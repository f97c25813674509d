use async_trait::async_trait;
use uuid::Uuid;

use stagecraft_catalog::gallery::{Gallery, GalleryImage};
use stagecraft_catalog::item::{InventoryItem, ItemCategory};
use stagecraft_shared::models::contact::ContactSubmission;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Inventory item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Image not found: {0}")]
    ImageNotFound(Uuid),

    #[error("Contact submission not found: {0}")]
    SubmissionNotFound(Uuid),

    #[error("Gallery changed concurrently: expected version {expected}, found {found}")]
    VersionConflict { expected: i64, found: i64 },

    #[error("Storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// A gallery together with the version counter observed when it was read.
/// Mutations must present this version back and fail on mismatch.
#[derive(Debug, Clone)]
pub struct VersionedGallery {
    pub gallery: Gallery,
    pub version: i64,
}

/// Repository trait for gallery persistence.
///
/// Implementations must make each mutation atomic: either both position
/// updates of a swap commit, or neither; delete and renumber commit
/// together. A version mismatch rejects the operation with no mutation.
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// All images for an item, ordered by position (main image first)
    async fn fetch_gallery(&self, item_id: Uuid) -> Result<VersionedGallery, RepositoryError>;

    /// Atomically exchange the images at two 1-indexed positions
    async fn swap_positions(
        &self,
        item_id: Uuid,
        first: usize,
        second: usize,
        expected_version: i64,
    ) -> Result<(), RepositoryError>;

    /// Atomically delete an extra image and close the position gap
    async fn delete_image(
        &self,
        item_id: Uuid,
        image_id: Uuid,
        expected_version: i64,
    ) -> Result<(), RepositoryError>;

    /// Append an image at position N + 1
    async fn attach_image(
        &self,
        item_id: Uuid,
        source: &str,
        label: &str,
    ) -> Result<GalleryImage, RepositoryError>;
}

/// Repository trait for inventory catalog access
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create_item(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepositoryError>;

    async fn list_items(
        &self,
        category: Option<&ItemCategory>,
        available_only: bool,
    ) -> Result<Vec<InventoryItem>, RepositoryError>;

    async fn update_item(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    /// Delete an item and cascade its extra images
    async fn delete_item(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Repository trait for contact submissions
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_submission(&self, submission: &ContactSubmission)
        -> Result<(), RepositoryError>;

    async fn list_submissions(
        &self,
        unread_only: bool,
    ) -> Result<Vec<ContactSubmission>, RepositoryError>;

    async fn mark_read(&self, id: Uuid) -> Result<(), RepositoryError>;
}
