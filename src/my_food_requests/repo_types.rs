use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    common::same_text,
    food_requests::repo_types::{FoodRequestPatch, PatchableRequest, RequestFieldsMut},
};

/// Denormalized copy of a request with the listing and donor fields copied
/// in. Nothing keeps it in sync with `foodRequests` or `foods`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MyFoodRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "foodID")]
    pub food_id: Uuid,
    pub food_name: String,
    #[serde(rename = "foodImgURL")]
    pub food_img_url: String,
    pub location: String,
    pub donator_name: String,
    pub donator_email: String,
    #[serde(rename = "donatorImageURL")]
    pub donator_image_url: String,
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

impl MyFoodRequest {
    pub fn involves(&self, email: &str) -> bool {
        same_text(&self.requester_email, email) || same_text(&self.donator_email, email)
    }
}

#[derive(Debug, Clone)]
pub struct NewMyFoodRequest {
    pub food_id: Uuid,
    pub food_name: String,
    pub food_img_url: String,
    pub location: String,
    pub donator_name: String,
    pub donator_email: String,
    pub donator_image_url: String,
    pub requested_date: OffsetDateTime,
    pub expire_date: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_image_url: String,
    pub requester_message: String,
    pub donation_amount: Option<f64>,
    pub status: String,
}

impl NewMyFoodRequest {
    pub fn into_request(self, id: Uuid) -> MyFoodRequest {
        MyFoodRequest {
            id,
            food_id: self.food_id,
            food_name: self.food_name,
            food_img_url: self.food_img_url,
            location: self.location,
            donator_name: self.donator_name,
            donator_email: self.donator_email,
            donator_image_url: self.donator_image_url,
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

/// Same mutable fields as a plain food request.
pub type MyFoodRequestPatch = FoodRequestPatch;

impl PatchableRequest for MyFoodRequest {
    fn request_fields(&mut self) -> RequestFieldsMut<'_> {
        RequestFieldsMut {
            expire_date: &mut self.expire_date,
            requester_message: &mut self.requester_message,
            donation_amount: &mut self.donation_amount,
            status: &mut self.status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MyFoodRequestFilter {
    pub requester_email: Option<String>,
    pub donator_email: Option<String>,
    pub status: Option<String>,
}

impl MyFoodRequestFilter {
    pub fn matches(&self, req: &MyFoodRequest) -> bool {
        self.requester_email
            .as_ref()
            .map_or(true, |e| same_text(&req.requester_email, e))
            && self
                .donator_email
                .as_ref()
                .map_or(true, |e| same_text(&req.donator_email, e))
            && self
                .status
                .as_ref()
                .map_or(true, |s| same_text(&req.status, s))
    }
}
