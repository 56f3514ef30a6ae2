//! Combination (`generated` table) model and DTOs.

use pairblend_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blended portrait for one unordered pair of people.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Combination {
    pub id: DbId,
    /// Canonical pair label, e.g. `"Alice x Bob"`.
    pub name: String,
    /// URL of the generated image.
    pub image: String,
    pub created_at: Timestamp,
}

/// DTO for recording a finished generation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCombination {
    pub name: String,
    pub image: String,
}

/// Result of inserting into the append-only `generated` table.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// This call created the row.
    Inserted(Combination),
    /// A row with the same label already existed (another writer won).
    AlreadyExists,
}
