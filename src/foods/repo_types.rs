use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Food listing document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub food_name: String,
    #[serde(rename = "foodImgURL")]
    pub food_img_url: String,
    pub quantity: String, // free text, e.g. "5" or "3 boxes"
    pub location: String,
    pub expire_date: String,
    pub donator_name: String,
    pub donator_email: String,
    #[serde(rename = "donatorImageURL")]
    pub donator_image_url: String,
    pub description: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Listing ready to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub food_name: String,
    pub food_img_url: String,
    pub quantity: String,
    pub location: String,
    pub expire_date: String,
    pub donator_name: String,
    pub donator_email: String,
    pub donator_image_url: String,
    pub description: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl NewFood {
    pub fn into_food(self, id: Uuid) -> Food {
        Food {
            id,
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
            created_at: self.created_at,
        }
    }
}

/// Fields to `$set`; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct FoodPatch {
    pub food_name: Option<String>,
    pub food_img_url: Option<String>,
    pub quantity: Option<String>,
    pub location: Option<String>,
    pub expire_date: Option<String>,
    pub donator_name: Option<String>,
    pub donator_email: Option<String>,
    pub donator_image_url: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl FoodPatch {
    pub fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.food_img_url.is_none()
            && self.quantity.is_none()
            && self.location.is_none()
            && self.expire_date.is_none()
            && self.donator_name.is_none()
            && self.donator_email.is_none()
            && self.donator_image_url.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }

    pub fn apply(self, food: &mut Food) {
        fn set(slot: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        set(&mut food.food_name, self.food_name);
        set(&mut food.food_img_url, self.food_img_url);
        set(&mut food.quantity, self.quantity);
        set(&mut food.location, self.location);
        set(&mut food.expire_date, self.expire_date);
        set(&mut food.donator_name, self.donator_name);
        set(&mut food.donator_email, self.donator_email);
        set(&mut food.donator_image_url, self.donator_image_url);
        set(&mut food.description, self.description);
        set(&mut food.status, self.status);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub donator_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodOrder {
    /// Insertion order.
    Natural,
    ExpireDateAsc,
    CreatedAtDesc,
    QuantityDesc,
}

impl FoodOrder {
    /// Maps the `/foods/sort/:sortMethod` segment; unknown methods mean unsorted.
    pub fn from_sort_method(method: &str) -> Self {
        match method {
            "expireDate" => FoodOrder::ExpireDateAsc,
            "createdAt" => FoodOrder::CreatedAtDesc,
            "quantity" => FoodOrder::QuantityDesc,
            _ => FoodOrder::Natural,
        }
    }
}
