use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories for staging inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Furniture,
    Art,
    Decor,
    Lighting,
    Rug,
    Plant,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Furniture => "FURNITURE",
            ItemCategory::Art => "ART",
            ItemCategory::Decor => "DECOR",
            ItemCategory::Lighting => "LIGHTING",
            ItemCategory::Rug => "RUG",
            ItemCategory::Plant => "PLANT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FURNITURE" => Some(ItemCategory::Furniture),
            "ART" => Some(ItemCategory::Art),
            "DECOR" => Some(ItemCategory::Decor),
            "LIGHTING" => Some(ItemCategory::Lighting),
            "RUG" => Some(ItemCategory::Rug),
            "PLANT" => Some(ItemCategory::Plant),
            _ => None,
        }
    }
}

/// A piece of staging inventory with its gallery anchor.
///
/// The main image lives directly on the item record; extra gallery images
/// are kept in a side table keyed by their own ids. `gallery_version` counts
/// gallery mutations and guards concurrent reorders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub is_available: bool,
    pub main_image_source: String,
    pub main_image_label: String,
    pub gallery_version: i64,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        name: String,
        description: Option<String>,
        category: ItemCategory,
        main_image_source: String,
        main_image_label: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            category,
            is_available: true,
            main_image_source,
            main_image_label,
            gallery_version: 0,
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }
}
