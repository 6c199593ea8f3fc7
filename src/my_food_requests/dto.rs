use serde::Deserialize;
use time::OffsetDateTime;

use super::repo_types::{MyFoodRequestFilter, NewMyFoodRequest};
use crate::{
    common::same_text,
    error::ApiError,
    food_requests::{
        dto::{check_donation, or_default, parse_food_id},
        repo_types::DEFAULT_REQUEST_STATUS,
    },
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMyRequestBody {
    #[serde(rename = "foodID")]
    pub food_id: String,
    pub food_name: String,
    #[serde(rename = "foodImgURL")]
    pub food_img_url: String,
    pub location: String,
    pub donator_name: String,
    pub donator_email: String,
    #[serde(rename = "donatorImageURL")]
    pub donator_image_url: String,
    pub expire_date: String,
    pub requester_name: String,
    pub requester_email: String,
    #[serde(rename = "requesterImageURL")]
    pub requester_image_url: String,
    pub requester_message: String,
    pub donation_amount: Option<f64>,
    pub status: String,
}

impl CreateMyRequestBody {
    pub fn into_new_request(
        self,
        caller_email: &str,
        now: OffsetDateTime,
    ) -> Result<NewMyFoodRequest, ApiError> {
        Ok(NewMyFoodRequest {
            food_id: parse_food_id(&self.food_id)?,
            food_name: self.food_name,
            food_img_url: self.food_img_url,
            location: self.location,
            donator_name: self.donator_name,
            donator_email: self.donator_email,
            donator_image_url: self.donator_image_url,
            requested_date: now,
            expire_date: self.expire_date,
            requester_name: self.requester_name,
            requester_email: or_default(self.requester_email, caller_email),
            requester_image_url: self.requester_image_url,
            requester_message: self.requester_message,
            donation_amount: check_donation(self.donation_amount)?,
            status: or_default(self.status, DEFAULT_REQUEST_STATUS),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyFoodRequestQuery {
    pub email: Option<String>,
    pub donator_email: Option<String>,
    pub status: Option<String>,
}

impl MyFoodRequestQuery {
    /// Listing is scoped to the caller: by default their own requests, or
    /// with `donatorEmail` the requests made on their listings. Asking for
    /// anyone else's is forbidden.
    pub fn into_filter(self, caller_email: &str) -> Result<MyFoodRequestFilter, ApiError> {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let status = non_blank(self.status);

        if let Some(donator) = non_blank(self.donator_email) {
            if !same_text(&donator, caller_email) {
                return Err(ApiError::Forbidden);
            }
            return Ok(MyFoodRequestFilter {
                requester_email: None,
                donator_email: Some(donator),
                status,
            });
        }

        let email = non_blank(self.email).unwrap_or_else(|| caller_email.to_string());
        if !same_text(&email, caller_email) {
            return Err(ApiError::Forbidden);
        }
        Ok(MyFoodRequestFilter {
            requester_email: Some(email),
            donator_email: None,
            status,
        })
    }
}
