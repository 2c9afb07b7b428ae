//! # Attendant Repository
//!
//! Attendant records. Sales reference attendants without a foreign key so a
//! removed attendant never invalidates history; the listing read side joins
//! by id and tolerates the miss.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use tillpoint_core::Attendant;

/// Repository for attendant database operations.
#[derive(Debug, Clone)]
pub struct AttendantRepository {
    pool: SqlitePool,
}

impl AttendantRepository {
    /// Creates a new AttendantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AttendantRepository { pool }
    }

    /// Inserts an attendant.
    pub async fn insert(&self, attendant: &Attendant) -> DbResult<()> {
        debug!(id = %attendant.id, username = %attendant.username, "inserting attendant");

        sqlx::query(
            r#"
            INSERT INTO attendants (id, username, display_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&attendant.id)
        .bind(&attendant.username)
        .bind(&attendant.display_name)
        .bind(attendant.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an attendant by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Attendant>> {
        let attendant = sqlx::query_as::<_, Attendant>(
            r#"
            SELECT id, username, display_name, created_at
            FROM attendants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendant)
    }

    /// Gets an attendant by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Attendant>> {
        let attendant = sqlx::query_as::<_, Attendant>(
            r#"
            SELECT id, username, display_name, created_at
            FROM attendants
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendant)
    }
}

/// Generates a new attendant ID.
pub fn generate_attendant_id() -> String {
    Uuid::new_v4().to_string()
}
