use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use uuid::Uuid;
use zip_directory::directory::{
    Contact, ContactId, ContactRepository, ContactUpdate, NewContact, RepositoryError, ZipCode,
    ZipRange,
};

/// Postgres-backed contact store. One pool is constructed at startup and
/// injected into the service; connections are established lazily on first
/// use and reused for the lifetime of the process.
pub(crate) struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub(crate) fn connect_lazy(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .map_err(storage_fault)?;
        Ok(Self { pool })
    }

    /// Create the contacts table when it does not exist yet.
    pub(crate) async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contacts (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                zip_ranges JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(storage_fault)?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    zip_ranges: Json<Vec<ZipRange>>,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: ContactId(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            zip_ranges: row.zip_ranges.0,
            created_at: row.created_at,
        }
    }
}

const SELECT_CONTACTS: &str =
    "SELECT id, name, email, phone, zip_ranges, created_at FROM contacts ORDER BY created_at";

#[async_trait]
impl ContactRepository for PgContactStore {
    async fn insert(&self, contact: NewContact) -> Result<Contact, RepositoryError> {
        let stored = Contact {
            id: ContactId(Uuid::new_v4()),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            zip_ranges: contact.zip_ranges,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO contacts (id, name, email, phone, zip_ranges, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(stored.id.0)
        .bind(&stored.name)
        .bind(&stored.email)
        .bind(&stored.phone)
        .bind(Json(&stored.zip_ranges))
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_fault)?;

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(SELECT_CONTACTS)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_fault)?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn search_by_zip(&self, zip: ZipCode) -> Result<Vec<Contact>, RepositoryError> {
        // Containment runs through the shared matcher so every backend
        // answers range queries identically.
        let rows = sqlx::query_as::<_, ContactRow>(SELECT_CONTACTS)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_fault)?;
        Ok(rows
            .into_iter()
            .map(Contact::from)
            .filter(|contact| contact.matches_zip(zip))
            .collect())
    }

    async fn update(&self, id: &ContactId, update: ContactUpdate) -> Result<(), RepositoryError> {
        // Single statement keeps the partial merge atomic; unset fields
        // fall back to their stored values.
        let result = sqlx::query(
            "UPDATE contacts SET \
             name = COALESCE($2, name), \
             email = COALESCE($3, email), \
             phone = COALESCE($4, phone), \
             zip_ranges = COALESCE($5, zip_ranges) \
             WHERE id = $1",
        )
        .bind(id.0)
        .bind(update.name)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.zip_ranges.map(Json))
        .execute(&self.pool)
        .await
        .map_err(storage_fault)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_fault)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn storage_fault(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}
