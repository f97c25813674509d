use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct GalleryReorderedEvent {
    pub item_id: Uuid,
    pub moved_from: usize,
    pub moved_to: usize,
    pub gallery_version: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct GalleryImageDeletedEvent {
    pub item_id: Uuid,
    pub image_id: Uuid,
    pub gallery_version: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct GalleryImageAttachedEvent {
    pub item_id: Uuid,
    pub image_id: Uuid,
    pub position: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct InventoryChangedEvent {
    pub item_id: Uuid,
    pub action: InventoryAction,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ContactReceivedEvent {
    pub submission_id: Uuid,
    pub timestamp: i64,
}

/// Envelope carried on the in-process event bus and fanned out to
/// subscribed admin views.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    GalleryReordered(GalleryReorderedEvent),
    GalleryImageDeleted(GalleryImageDeletedEvent),
    GalleryImageAttached(GalleryImageAttachedEvent),
    InventoryChanged(InventoryChangedEvent),
    ContactReceived(ContactReceivedEvent),
}
