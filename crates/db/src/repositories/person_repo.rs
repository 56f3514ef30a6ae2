//! Repository for the `people` table.

use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person};

/// Column list for people queries.
const COLUMNS: &str = "id, name, image, created_at";

/// Provides insert and read operations for registered people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    ///
    /// A duplicate name surfaces as a unique violation on `uq_people_name`;
    /// callers decide how to report it.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (name, image)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// List every person in registration order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people ORDER BY id");
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }
}
