//! Person entity model and DTOs.

use pairblend_core::pairing::Named;
use pairblend_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered player from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    /// Display name; unique across the table.
    pub name: String,
    /// Public URL of the uploaded photo.
    pub image: String,
    pub created_at: Timestamp,
}

impl Named for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

/// DTO for registering a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub image: String,
}
