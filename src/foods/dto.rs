use serde::Deserialize;
use time::OffsetDateTime;

use super::repo_types::{FoodFilter, FoodPatch, NewFood};

/// POST /foods body. Every field is optional; missing strings become "".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFoodRequest {
    pub food_name: String,
    #[serde(rename = "foodImgURL")]
    pub food_img_url: String,
    pub quantity: String,
    pub location: String,
    pub expire_date: String,
    pub donator_name: String,
    pub donator_email: String,
    #[serde(rename = "donatorImageURL")]
    pub donator_image_url: String,
    pub description: String,
    pub status: String,
}

impl CreateFoodRequest {
    pub fn into_new_food(self, now: OffsetDateTime) -> NewFood {
        NewFood {
            food_name: self.food_name,
            food_img_url: self.food_img_url,
            quantity: self.quantity,
            location: self.location,
            expire_date: self.expire_date,
            donator_name: self.donator_name,
            donator_email: self.donator_email,
            donator_image_url: self.donator_image_url,
            description: self.description,
            status: self.status,
            created_at: now,
        }
    }
}

/// PUT /foods/:id body; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFoodRequest {
    pub food_name: Option<String>,
    #[serde(rename = "foodImgURL")]
    pub food_img_url: Option<String>,
    pub quantity: Option<String>,
    pub location: Option<String>,
    pub expire_date: Option<String>,
    pub donator_name: Option<String>,
    pub donator_email: Option<String>,
    #[serde(rename = "donatorImageURL")]
    pub donator_image_url: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateFoodRequest> for FoodPatch {
    fn from(r: UpdateFoodRequest) -> Self {
        Self {
            food_name: r.food_name,
            food_img_url: r.food_img_url,
            quantity: r.quantity,
            location: r.location,
            expire_date: r.expire_date,
            donator_name: r.donator_name,
            donator_email: r.donator_email,
            donator_image_url: r.donator_image_url,
            description: r.description,
            status: r.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub donator_email: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<FoodQuery> for FoodFilter {
    fn from(q: FoodQuery) -> Self {
        Self {
            search: non_blank(q.search),
            status: non_blank(q.status),
            donator_email: non_blank(q.donator_email),
        }
    }
}
