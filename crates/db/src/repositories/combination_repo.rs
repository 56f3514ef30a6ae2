//! Repository for the `generated` table.
//!
//! The table is an append-only set keyed by canonical pair label. Inserts
//! never overwrite: a second writer for the same label gets
//! [`InsertOutcome::AlreadyExists`] instead of an error.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::combination::{Combination, CreateCombination, InsertOutcome};

/// Column list for generated queries.
const COLUMNS: &str = "id, name, image, created_at";

/// Provides insert and read operations for generated combinations.
pub struct CombinationRepo;

impl CombinationRepo {
    /// Insert a combination unless its label is already taken.
    ///
    /// The unique constraint on `name` is the only serialization point
    /// between concurrent workers.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateCombination,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated (name, image)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, Combination>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Inserted(row)),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(name = %input.name, "Combination already recorded");
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// List every combination, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Combination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated ORDER BY id");
        sqlx::query_as::<_, Combination>(&query).fetch_all(pool).await
    }

    /// Load the set of labels that already have a combination.
    pub async fn list_names(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM generated")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Find a combination by its canonical label.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Combination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated WHERE name = $1");
        sqlx::query_as::<_, Combination>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
