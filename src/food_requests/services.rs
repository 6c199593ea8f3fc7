use std::collections::HashMap;

use uuid::Uuid;

use super::repo_types::{FoodRequest, FoodRequestFilter, FoodRequestWithFood};
use crate::{common::same_text, foods::Food};

pub fn matches_filter(req: &FoodRequest, filter: &FoodRequestFilter) -> bool {
    if let Some(food_id) = filter.food_id {
        if req.food_id != food_id {
            return false;
        }
    }
    if let Some(email) = &filter.requester_email {
        if !same_text(&req.requester_email, email) {
            return false;
        }
    }
    if let Some(status) = &filter.status {
        if !same_text(&req.status, status) {
            return false;
        }
    }
    true
}

/// Distinct listing ids referenced by the requests, in first-seen order.
pub fn referenced_food_ids(requests: &[FoodRequest]) -> Vec<Uuid> {
    let mut seen = Vec::new();
    for r in requests {
        if !seen.contains(&r.food_id) {
            seen.push(r.food_id);
        }
    }
    seen
}

/// Left join: every request is kept, `food` is None when the listing is gone.
pub fn join_with_foods(requests: Vec<FoodRequest>, foods: Vec<Food>) -> Vec<FoodRequestWithFood> {
    let by_id: HashMap<Uuid, Food> = foods.into_iter().map(|f| (f.id, f)).collect();
    requests
        .into_iter()
        .map(|request| {
            let food = by_id.get(&request.food_id).cloned();
            FoodRequestWithFood { request, food }
        })
        .collect()
}
