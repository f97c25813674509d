use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use stagecraft_core::repository::{ContactRepository, RepositoryError};
use stagecraft_shared::models::contact::ContactSubmission;
use stagecraft_shared::pii::Masked;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for ContactSubmission {
    fn from(row: SubmissionRow) -> Self {
        ContactSubmission {
            id: row.id,
            name: row.name,
            email: Masked(row.email),
            phone: row.phone.map(Masked),
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO contact_submissions \
             (id, name, email, phone, message, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(submission.email.inner())
        .bind(submission.phone.as_ref().map(|phone| phone.inner().as_str()))
        .bind(&submission.message)
        .bind(submission.is_read)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(())
    }

    async fn list_submissions(
        &self,
        unread_only: bool,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT id, name, email, phone, message, is_read, created_at \
             FROM contact_submissions \
             WHERE (NOT $1 OR NOT is_read) ORDER BY created_at DESC",
        )
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(rows.into_iter().map(ContactSubmission::from).collect())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE contact_submissions SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::SubmissionNotFound(id));
        }
        Ok(())
    }
}
