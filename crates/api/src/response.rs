//! Shared response envelope for API handlers.
//!
//! Successful responses carry `"status": "success"` next to the payload
//! fields. Use [`Success`] instead of ad-hoc `json!` bodies so the status
//! marker cannot be forgotten.

use serde::Serialize;

/// `{ "status": "success", ...T }` response envelope.
///
/// `T` must serialize to a JSON object; its fields are flattened into the
/// envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Success::new(ExistsResponse { exists, service, id })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    status: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}
