use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use stagecraft_catalog::gallery::{Gallery, GalleryImage};
use stagecraft_core::repository::{GalleryStore, RepositoryError, VersionedGallery};

/// Gallery persistence over two tables: the main image lives on
/// `inventory_items`, extra images in `inventory_images` with a 1-indexed
/// `position` column starting at 2.
///
/// Every mutation runs in a single transaction, takes a row lock on the
/// item, verifies the caller's observed `gallery_version`, and bumps it on
/// commit. A losing writer gets a version conflict and no rows change.
pub struct PostgresGalleryStore {
    pool: PgPool,
}

impl PostgresGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExtraImageRow {
    id: Uuid,
    source: String,
    label: String,
    #[allow(dead_code)]
    position: i32,
}

/// Lock the item row and return (main_source, main_label, gallery_version)
async fn lock_item(
    tx: &mut Transaction<'_, Postgres>,
    item_id: Uuid,
) -> Result<(String, String, i64), RepositoryError> {
    let row = sqlx::query(
        "SELECT main_image_source, main_image_label, gallery_version \
         FROM inventory_items WHERE id = $1 FOR UPDATE",
    )
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(RepositoryError::backend)?
    .ok_or(RepositoryError::ItemNotFound(item_id))?;

    Ok((
        row.try_get("main_image_source").map_err(RepositoryError::backend)?,
        row.try_get("main_image_label").map_err(RepositoryError::backend)?,
        row.try_get("gallery_version").map_err(RepositoryError::backend)?,
    ))
}

async fn extra_at_position(
    tx: &mut Transaction<'_, Postgres>,
    item_id: Uuid,
    position: usize,
) -> Result<ExtraImageRow, RepositoryError> {
    sqlx::query_as::<_, ExtraImageRow>(
        "SELECT id, source, label, position FROM inventory_images \
         WHERE item_id = $1 AND position = $2",
    )
    .bind(item_id)
    .bind(position as i32)
    .fetch_optional(&mut **tx)
    .await
    .map_err(RepositoryError::backend)?
    .ok_or_else(|| {
        RepositoryError::backend(format!(
            "gallery for item {} has no image at position {}",
            item_id, position
        ))
    })
}

async fn bump_version(
    tx: &mut Transaction<'_, Postgres>,
    item_id: Uuid,
    expected_version: i64,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        "UPDATE inventory_items \
         SET gallery_version = gallery_version + 1, updated_at = NOW() \
         WHERE id = $1 AND gallery_version = $2",
    )
    .bind(item_id)
    .bind(expected_version)
    .execute(&mut **tx)
    .await
    .map_err(RepositoryError::backend)?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::VersionConflict {
            expected: expected_version,
            found: expected_version + 1,
        });
    }
    Ok(())
}

#[async_trait]
impl GalleryStore for PostgresGalleryStore {
    async fn fetch_gallery(&self, item_id: Uuid) -> Result<VersionedGallery, RepositoryError> {
        let item = sqlx::query(
            "SELECT main_image_source, main_image_label, gallery_version \
             FROM inventory_items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::backend)?
        .ok_or(RepositoryError::ItemNotFound(item_id))?;

        let main_source: String = item
            .try_get("main_image_source")
            .map_err(RepositoryError::backend)?;
        let main_label: String = item
            .try_get("main_image_label")
            .map_err(RepositoryError::backend)?;
        let version: i64 = item
            .try_get("gallery_version")
            .map_err(RepositoryError::backend)?;

        let extras = sqlx::query_as::<_, ExtraImageRow>(
            "SELECT id, source, label, position FROM inventory_images \
             WHERE item_id = $1 ORDER BY position",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        let mut images = vec![GalleryImage::main(main_source, main_label)];
        images.extend(
            extras
                .into_iter()
                .map(|row| GalleryImage::extra(row.id, row.source, row.label)),
        );

        let gallery = Gallery::from_images(images).map_err(RepositoryError::backend)?;
        Ok(VersionedGallery { gallery, version })
    }

    async fn swap_positions(
        &self,
        item_id: Uuid,
        first: usize,
        second: usize,
        expected_version: i64,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::backend)?;

        let (main_source, main_label, found) = lock_item(&mut tx, item_id).await?;
        if found != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                found,
            });
        }

        let (low, high) = (first.min(second), first.max(second));
        if low != high {
            if low == 1 {
                // Exchange content between the item record and the extra row;
                // the row keeps its id and position.
                let extra = extra_at_position(&mut tx, item_id, high).await?;

                sqlx::query(
                    "UPDATE inventory_items \
                     SET main_image_source = $2, main_image_label = $3 WHERE id = $1",
                )
                .bind(item_id)
                .bind(&extra.source)
                .bind(&extra.label)
                .execute(&mut *tx)
                .await
                .map_err(RepositoryError::backend)?;

                sqlx::query("UPDATE inventory_images SET source = $2, label = $3 WHERE id = $1")
                    .bind(extra.id)
                    .bind(&main_source)
                    .bind(&main_label)
                    .execute(&mut *tx)
                    .await
                    .map_err(RepositoryError::backend)?;
            } else {
                // Two extra rows trade positions; ids travel with the images.
                let first_row = extra_at_position(&mut tx, item_id, low).await?;
                let second_row = extra_at_position(&mut tx, item_id, high).await?;

                sqlx::query("UPDATE inventory_images SET position = $2 WHERE id = $1")
                    .bind(first_row.id)
                    .bind(high as i32)
                    .execute(&mut *tx)
                    .await
                    .map_err(RepositoryError::backend)?;

                sqlx::query("UPDATE inventory_images SET position = $2 WHERE id = $1")
                    .bind(second_row.id)
                    .bind(low as i32)
                    .execute(&mut *tx)
                    .await
                    .map_err(RepositoryError::backend)?;
            }
        }

        bump_version(&mut tx, item_id, expected_version).await?;
        tx.commit().await.map_err(RepositoryError::backend)?;
        Ok(())
    }

    async fn delete_image(
        &self,
        item_id: Uuid,
        image_id: Uuid,
        expected_version: i64,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::backend)?;

        let (_, _, found) = lock_item(&mut tx, item_id).await?;
        if found != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                found,
            });
        }

        let row = sqlx::query(
            "SELECT position FROM inventory_images WHERE id = $1 AND item_id = $2",
        )
        .bind(image_id)
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::backend)?
        .ok_or(RepositoryError::ImageNotFound(image_id))?;
        let position: i32 = row.try_get("position").map_err(RepositoryError::backend)?;

        sqlx::query("DELETE FROM inventory_images WHERE id = $1")
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::backend)?;

        sqlx::query(
            "UPDATE inventory_images SET position = position - 1 \
             WHERE item_id = $1 AND position > $2",
        )
        .bind(item_id)
        .bind(position)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::backend)?;

        bump_version(&mut tx, item_id, expected_version).await?;
        tx.commit().await.map_err(RepositoryError::backend)?;
        Ok(())
    }

    async fn attach_image(
        &self,
        item_id: Uuid,
        source: &str,
        label: &str,
    ) -> Result<GalleryImage, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::backend)?;

        let (_, _, version) = lock_item(&mut tx, item_id).await?;

        let next_position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 1) + 1 FROM inventory_images WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::backend)?;

        let image_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO inventory_images (id, item_id, source, label, position) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(image_id)
        .bind(item_id)
        .bind(source)
        .bind(label)
        .bind(next_position)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::backend)?;

        bump_version(&mut tx, item_id, version).await?;
        tx.commit().await.map_err(RepositoryError::backend)?;

        Ok(GalleryImage::extra(image_id, source, label))
    }
}
