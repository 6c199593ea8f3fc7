use std::cmp::Ordering;

use super::repo_types::{Food, FoodFilter, FoodOrder};
use crate::common::same_text;

/// Leading integer of a free-text quantity ("12 boxes" -> 12).
/// Values too large to fit saturate instead of being dropped.
pub fn leading_quantity(quantity: &str) -> Option<u128> {
    let digits: String = quantity
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u128>().unwrap_or(u128::MAX))
}

pub fn matches_filter(food: &Food, filter: &FoodFilter) -> bool {
    if let Some(search) = &filter.search {
        if !food
            .food_name
            .to_lowercase()
            .contains(&search.to_lowercase())
        {
            return false;
        }
    }
    if let Some(status) = &filter.status {
        if !same_text(&food.status, status) {
            return false;
        }
    }
    if let Some(email) = &filter.donator_email {
        if !same_text(&food.donator_email, email) {
            return false;
        }
    }
    true
}

fn quantity_desc(a: &Food, b: &Food) -> Ordering {
    match (leading_quantity(&a.quantity), leading_quantity(&b.quantity)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts in place. Sorting is stable, so ties keep insertion order.
pub fn sort_foods(foods: &mut [Food], order: FoodOrder) {
    match order {
        FoodOrder::Natural => {}
        FoodOrder::ExpireDateAsc => foods.sort_by(|a, b| a.expire_date.cmp(&b.expire_date)),
        FoodOrder::CreatedAtDesc => foods.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FoodOrder::QuantityDesc => foods.sort_by(quantity_desc),
    }
}

/// Filter, sort, then limit: the same pipeline the SQL queries express.
pub fn select_foods(
    foods: impl IntoIterator<Item = Food>,
    filter: &FoodFilter,
    order: FoodOrder,
    limit: Option<i64>,
) -> Vec<Food> {
    let mut out: Vec<Food> = foods
        .into_iter()
        .filter(|f| matches_filter(f, filter))
        .collect();
    sort_foods(&mut out, order);
    if let Some(limit) = limit {
        out.truncate(limit.max(0) as usize);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    fn food(name: &str, quantity: &str, expire: &str, status: &str, age_mins: i64) -> Food {
        Food {
            id: Uuid::new_v4(),
            food_name: name.into(),
            food_img_url: String::new(),
            quantity: quantity.into(),
            location: "Dhaka".into(),
            expire_date: expire.into(),
            donator_name: "Dana".into(),
            donator_email: "dana@example.com".into(),
            donator_image_url: String::new(),
            description: String::new(),
            status: status.into(),
            created_at: OffsetDateTime::now_utc() - Duration::minutes(age_mins),
        }
    }

    fn names(foods: &[Food]) -> Vec<&str> {
        foods.iter().map(|f| f.food_name.as_str()).collect()
    }

    #[test]
    fn leading_quantity_parses_prefix() {
        assert_eq!(leading_quantity("12"), Some(12));
        assert_eq!(leading_quantity(" 3 boxes"), Some(3));
        assert_eq!(leading_quantity("a dozen"), None);
        assert_eq!(leading_quantity(""), None);
        assert_eq!(
            leading_quantity("999999999999999999999999999999999999999999"),
            Some(u128::MAX)
        );
    }

    #[test]
    fn quantity_order_is_numeric_not_lexicographic() {
        let mut foods = vec![
            food("nine", "9", "", "", 3),
            food("many", "lots", "", "", 2),
            food("twelve", "12 kg", "", "", 1),
        ];
        sort_foods(&mut foods, FoodOrder::QuantityDesc);
        assert_eq!(names(&foods), vec!["twelve", "nine", "many"]);
    }

    #[test]
    fn expire_date_sorts_ascending() {
        let mut foods = vec![
            food("late", "1", "2024-03-01", "", 3),
            food("early", "1", "2024-01-15", "", 2),
            food("mid", "1", "2024-02-10", "", 1),
        ];
        sort_foods(&mut foods, FoodOrder::ExpireDateAsc);
        assert_eq!(names(&foods), vec!["early", "mid", "late"]);
    }

    #[test]
    fn created_at_sorts_newest_first() {
        let mut foods = vec![food("old", "1", "", "", 30), food("new", "1", "", "", 1)];
        sort_foods(&mut foods, FoodOrder::CreatedAtDesc);
        assert_eq!(names(&foods), vec!["new", "old"]);
    }

    #[test]
    fn unknown_sort_method_keeps_natural_order() {
        assert_eq!(FoodOrder::from_sort_method("banana"), FoodOrder::Natural);
        assert_eq!(FoodOrder::from_sort_method("expireDate"), FoodOrder::ExpireDateAsc);
    }

    #[test]
    fn filter_search_and_status_ignore_case() {
        let foods = vec![
            food("Rice Bowl", "1", "", "Available", 2),
            food("Bread", "1", "", "available", 1),
            food("Fried rice", "1", "", "delivered", 0),
        ];
        let filter = FoodFilter {
            search: Some("RICE".into()),
            status: Some("AVAILABLE".into()),
            donator_email: None,
        };
        let out = select_foods(foods, &filter, FoodOrder::Natural, None);
        assert_eq!(names(&out), vec!["Rice Bowl"]);
    }

    #[test]
    fn filter_folds_non_ascii_status_and_donor_email() {
        let mut pie = food("Pie", "1", "", "Épuisé", 1);
        pie.donator_email = "Dana.Donor@Example.com".into();
        let foods = vec![pie, food("Soup", "1", "", "épuisé", 0)];
        let filter = FoodFilter {
            search: None,
            status: Some("ÉPUISÉ".into()),
            donator_email: Some("dana.donor@example.com".into()),
        };
        let out = select_foods(foods, &filter, FoodOrder::Natural, None);
        assert_eq!(names(&out), vec!["Pie"]);
    }

    #[test]
    fn limit_applies_after_sort() {
        let foods: Vec<Food> = (1..=8)
            .map(|n| food(&format!("f{n}"), &n.to_string(), "", "", 10 - n))
            .collect();
        let out = select_foods(foods, &FoodFilter::default(), FoodOrder::QuantityDesc, Some(6));
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].food_name, "f8");
        assert_eq!(out[5].food_name, "f3");
    }
}
