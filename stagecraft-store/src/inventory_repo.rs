use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use stagecraft_catalog::item::{InventoryItem, ItemCategory};
use stagecraft_core::repository::{InventoryRepository, RepositoryError};

pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category: String,
    is_available: bool,
    main_image_source: String,
    main_image_label: String,
    gallery_version: i64,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: row.id,
            name: row.name,
            description: row.description,
            category: ItemCategory::parse(&row.category).unwrap_or(ItemCategory::Decor),
            is_available: row.is_available,
            main_image_source: row.main_image_source,
            main_image_label: row.main_image_label,
            gallery_version: row.gallery_version,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ITEM_COLUMNS: &str = "id, name, description, category, is_available, \
    main_image_source, main_image_label, gallery_version, metadata, created_at, updated_at";

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn create_item(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO inventory_items \
             (id, name, description, category, is_available, main_image_source, \
              main_image_label, gallery_version, metadata, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(item.category.as_str())
        .bind(item.is_available)
        .bind(&item.main_image_source)
        .bind(&item.main_image_label)
        .bind(item.gallery_version)
        .bind(&item.metadata)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(())
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(row.map(InventoryItem::from))
    }

    async fn list_items(
        &self,
        category: Option<&ItemCategory>,
        available_only: bool,
    ) -> Result<Vec<InventoryItem>, RepositoryError> {
        let rows = if let Some(category) = category {
            sqlx::query_as::<_, ItemRow>(&format!(
                "SELECT {} FROM inventory_items \
                 WHERE category = $1 AND (is_available OR NOT $2) ORDER BY name",
                ITEM_COLUMNS
            ))
            .bind(category.as_str())
            .bind(available_only)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, ItemRow>(&format!(
                "SELECT {} FROM inventory_items \
                 WHERE (is_available OR NOT $1) ORDER BY name",
                ITEM_COLUMNS
            ))
            .bind(available_only)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(RepositoryError::backend)?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    async fn update_item(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE inventory_items \
             SET name = $2, description = $3, category = $4, is_available = $5, \
                 main_image_source = $6, main_image_label = $7, metadata = $8, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(item.category.as_str())
        .bind(item.is_available)
        .bind(&item.main_image_source)
        .bind(&item.main_image_label)
        .bind(&item.metadata)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::ItemNotFound(item.id));
        }
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), RepositoryError> {
        // Extra images go with the item via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::ItemNotFound(id));
        }
        Ok(())
    }
}
