//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod combination_repo;
pub mod person_repo;

pub use combination_repo::CombinationRepo;
pub use person_repo::PersonRepo;
