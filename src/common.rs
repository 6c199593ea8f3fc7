use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Parses a path id; anything that is not a well-formed id is rejected
/// before it reaches a store.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidId)
}

/// Case-insensitive equality with the same folding as Postgres `lower()`.
/// Used for statuses and emails.
pub fn same_text(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl UpdateResult {
    pub fn matched(n: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: n,
            modified_count: n,
        }
    }
}

impl DeleteResult {
    pub fn deleted(n: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: n,
        }
    }
}

/// 201 with a Location header pointing at the new document.
pub fn created(
    collection: &str,
    id: Uuid,
) -> (StatusCode, HeaderMap, Json<InsertOneResult>) {
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/{}/{}", collection, id)) {
        headers.insert(header::LOCATION, location);
    }
    (
        StatusCode::CREATED,
        headers,
        Json(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_short_and_garbage_ids() {
        assert!(matches!(parse_id("123"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("653f1c2e9b1d4a0012345678"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id(""), Err(ApiError::InvalidId)));
    }

    #[test]
    fn same_text_folds_unicode_case() {
        assert!(same_text("Dana.Donor@Example.com", "dana.donor@example.com"));
        assert!(same_text("ÉPUISÉ", "épuisé"));
        assert!(!same_text("pending", "approved"));
    }

    #[test]
    fn write_results_use_driver_field_names() {
        let json = serde_json::to_value(UpdateResult::matched(1)).unwrap();
        assert_eq!(json["matchedCount"], 1);
        assert_eq!(json["modifiedCount"], 1);
        let json = serde_json::to_value(DeleteResult::deleted(0)).unwrap();
        assert_eq!(json["deletedCount"], 0);
        assert_eq!(json["acknowledged"], true);
    }

    #[test]
    fn created_sets_location() {
        let id = Uuid::new_v4();
        let (status, headers, Json(body)) = created("foods", id);
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            headers.get(header::LOCATION).unwrap().to_str().unwrap(),
            format!("/foods/{}", id)
        );
        assert_eq!(body.inserted_id, id);
    }
}
