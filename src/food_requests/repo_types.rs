use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::Food;

pub const DEFAULT_REQUEST_STATUS: &str = "pending";

/// Request for a food listing. `food_id` is not checked against `foods`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "foodID")]
    pub food_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_date: OffsetDateTime,
    pub expire_date: String,
    pub requester_name: String,
    pub requester_email: String,
    #[serde(rename = "requesterImageURL")]
    pub requester_image_url: String,
    pub requester_message: String,
    pub donation_amount: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewFoodRequest {
    pub food_id: Uuid,
    pub requested_date: OffsetDateTime,
    pub expire_date: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_image_url: String,
    pub requester_message: String,
    pub donation_amount: Option<f64>,
    pub status: String,
}

impl NewFoodRequest {
    pub fn into_request(self, id: Uuid) -> FoodRequest {
        FoodRequest {
            id,
            food_id: self.food_id,
            requested_date: self.requested_date,
            expire_date: self.expire_date,
            requester_name: self.requester_name,
            requester_email: self.requester_email,
            requester_image_url: self.requester_image_url,
            requester_message: self.requester_message,
            donation_amount: self.donation_amount,
            status: self.status,
        }
    }
}

/// `donation_amount`: `None` leaves it alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct FoodRequestPatch {
    pub expire_date: Option<String>,
    pub requester_message: Option<String>,
    pub donation_amount: Option<Option<f64>>,
    pub status: Option<String>,
}

/// Borrowed view of the fields a [`FoodRequestPatch`] can change.
pub struct RequestFieldsMut<'a> {
    pub expire_date: &'a mut String,
    pub requester_message: &'a mut String,
    pub donation_amount: &'a mut Option<f64>,
    pub status: &'a mut String,
}

/// Documents that carry the mutable request fields.
pub trait PatchableRequest {
    fn request_fields(&mut self) -> RequestFieldsMut<'_>;
}

impl PatchableRequest for FoodRequest {
    fn request_fields(&mut self) -> RequestFieldsMut<'_> {
        RequestFieldsMut {
            expire_date: &mut self.expire_date,
            requester_message: &mut self.requester_message,
            donation_amount: &mut self.donation_amount,
            status: &mut self.status,
        }
    }
}

impl FoodRequestPatch {
    pub fn is_empty(&self) -> bool {
        self.expire_date.is_none()
            && self.requester_message.is_none()
            && self.donation_amount.is_none()
            && self.status.is_none()
    }

    pub fn apply<R: PatchableRequest>(self, req: &mut R) {
        let fields = req.request_fields();
        if let Some(v) = self.expire_date {
            *fields.expire_date = v;
        }
        if let Some(v) = self.requester_message {
            *fields.requester_message = v;
        }
        if let Some(v) = self.donation_amount {
            *fields.donation_amount = v;
        }
        if let Some(v) = self.status {
            *fields.status = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodRequestFilter {
    pub food_id: Option<Uuid>,
    pub requester_email: Option<String>,
    pub status: Option<String>,
}

/// A request with its listing looked up at read time.
#[derive(Debug, Clone, Serialize)]
pub struct FoodRequestWithFood {
    #[serde(flatten)]
    pub request: FoodRequest,
    pub food: Option<Food>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FoodRequest {
        NewFoodRequest {
            food_id: Uuid::new_v4(),
            requested_date: OffsetDateTime::now_utc(),
            expire_date: "2024-05-01".into(),
            requester_name: "Rui".into(),
            requester_email: "rui@example.com".into(),
            requester_image_url: String::new(),
            requester_message: "please".into(),
            donation_amount: Some(12.5),
            status: DEFAULT_REQUEST_STATUS.into(),
        }
        .into_request(Uuid::new_v4())
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let mut req = request();
        FoodRequestPatch {
            status: Some("approved".into()),
            ..Default::default()
        }
        .apply(&mut req);
        assert_eq!(req.status, "approved");
        assert_eq!(req.requester_message, "please");
        assert_eq!(req.donation_amount, Some(12.5));
    }

    #[test]
    fn patch_can_clear_donation() {
        let mut req = request();
        let patch = FoodRequestPatch {
            donation_amount: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut req);
        assert_eq!(req.donation_amount, None);
    }
}
