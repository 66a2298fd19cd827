//! Shared response envelope types for API handlers.
//!
//! Every successful response body is `{ "success": true, "data": ... }`; the
//! failure half of the envelope is rendered by [`crate::error::AppError`].
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!` bodies.

use footlights_core::types::{id_string, DbId};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Serialize for DataResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DataResponse", 2)?;
        state.serialize_field("success", &true)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

/// Payload returned by hard deletes.
#[derive(Debug, Serialize)]
pub struct Deleted {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: DbId) -> DataResponse<Deleted> {
        DataResponse {
            data: Deleted { id, deleted: true },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_carries_success_flag() {
        let body = serde_json::to_value(DataResponse { data: vec![1, 2] }).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn deleted_id_is_a_string() {
        let body = serde_json::to_value(Deleted::new(9)).unwrap();
        assert_eq!(body, json!({ "success": true, "data": { "id": "9", "deleted": true } }));
    }
}
