//! Shared response envelope types for API handlers.
//!
//! Resource listings use a `{ "data": ... }` envelope. The trigger endpoint
//! is the exception: schedulers read its summary fields at the top level.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
