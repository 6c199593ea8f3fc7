use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{FoodRequestFilter, FoodRequestPatch, NewFoodRequest, DEFAULT_REQUEST_STATUS};
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRequestBody {
    #[serde(rename = "foodID")]
    pub food_id: String,
    pub expire_date: String,
    pub requester_name: String,
    pub requester_email: String,
    #[serde(rename = "requesterImageURL")]
    pub requester_image_url: String,
    pub requester_message: String,
    pub donation_amount: Option<f64>,
    pub status: String,
}

pub(crate) fn parse_food_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest("Invalid foodID".into()))
}

pub(crate) fn check_donation(amount: Option<f64>) -> Result<Option<f64>, ApiError> {
    match amount {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(ApiError::BadRequest("Invalid donationAmount".into()))
        }
        other => Ok(other),
    }
}

pub(crate) fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl CreateRequestBody {
    /// Validates the body; an empty requester email falls back to the caller's.
    pub fn into_new_request(
        self,
        caller_email: &str,
        now: OffsetDateTime,
    ) -> Result<NewFoodRequest, ApiError> {
        Ok(NewFoodRequest {
            food_id: parse_food_id(&self.food_id)?,
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

/// Tells an explicit `null` (`Some(None)`) apart from a missing field (`None`).
fn explicit_null<'de, D>(de: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(de).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestBody {
    pub expire_date: Option<String>,
    pub requester_message: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub donation_amount: Option<Option<f64>>,
    pub status: Option<String>,
}

impl TryFrom<UpdateRequestBody> for FoodRequestPatch {
    type Error = ApiError;

    fn try_from(b: UpdateRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            expire_date: b.expire_date,
            requester_message: b.requester_message,
            donation_amount: b.donation_amount.map(check_donation).transpose()?,
            status: b.status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequestQuery {
    pub food_id: Option<String>,
    pub requester_email: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<FoodRequestQuery> for FoodRequestFilter {
    type Error = ApiError;

    fn try_from(q: FoodRequestQuery) -> Result<Self, Self::Error> {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(Self {
            food_id: non_blank(q.food_id)
                .map(|s| parse_food_id(&s))
                .transpose()?,
            requester_email: non_blank(q.requester_email),
            status: non_blank(q.status),
        })
    }
}
