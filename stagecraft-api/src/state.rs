use std::sync::Arc;

use stagecraft_core::repository::{ContactRepository, GalleryStore, InventoryRepository};
use stagecraft_store::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub inventory_repo: Arc<dyn InventoryRepository>,
    pub gallery_store: Arc<dyn GalleryStore>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub events: EventBus,
}
