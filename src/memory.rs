use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    food_requests::{
        repo::FoodRequestRepo,
        repo_types::{FoodRequest, FoodRequestFilter, FoodRequestPatch, NewFoodRequest},
        services::matches_filter as request_matches,
    },
    foods::{
        repo::FoodRepo,
        repo_types::{Food, FoodFilter, FoodOrder, FoodPatch, NewFood},
        services::select_foods,
    },
    my_food_requests::{
        repo::MyFoodRequestRepo,
        repo_types::{MyFoodRequest, MyFoodRequestFilter, MyFoodRequestPatch, NewMyFoodRequest},
    },
};

/// Process-local store with the same semantics as the Postgres one.
/// Documents are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    foods: RwLock<Vec<Food>>,
    food_requests: RwLock<Vec<FoodRequest>>,
    my_food_requests: RwLock<Vec<MyFoodRequest>>,
}

fn read<T>(lock: &RwLock<T>) -> anyhow::Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> anyhow::Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
}

fn remove_by<T>(docs: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> u64 {
    let before = docs.len();
    docs.retain(|d| !pred(d));
    (before - docs.len()) as u64
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FoodRepo for MemoryStore {
    async fn insert(&self, food: NewFood) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        write(&self.foods)?.push(food.into_food(id));
        Ok(id)
    }

    async fn find(
        &self,
        filter: &FoodFilter,
        order: FoodOrder,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<Food>> {
        let foods = read(&self.foods)?;
        Ok(select_foods(foods.iter().cloned(), filter, order, limit))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        Ok(read(&self.foods)?.iter().find(|f| f.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Food>> {
        Ok(read(&self.foods)?
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, patch: FoodPatch) -> anyhow::Result<u64> {
        let mut foods = write(&self.foods)?;
        match foods.iter_mut().find(|f| f.id == id) {
            Some(food) => {
                patch.apply(food);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        Ok(remove_by(&mut *write(&self.foods)?, |f| f.id == id))
    }
}

#[async_trait]
impl FoodRequestRepo for MemoryStore {
    async fn insert(&self, req: NewFoodRequest) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        write(&self.food_requests)?.push(req.into_request(id));
        Ok(id)
    }

    async fn find(&self, filter: &FoodRequestFilter) -> anyhow::Result<Vec<FoodRequest>> {
        Ok(read(&self.food_requests)?
            .iter()
            .filter(|r| request_matches(r, filter))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<FoodRequest>> {
        Ok(read(&self.food_requests)?
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, patch: FoodRequestPatch) -> anyhow::Result<u64> {
        let mut requests = write(&self.food_requests)?;
        match requests.iter_mut().find(|r| r.id == id) {
            Some(req) => {
                patch.apply(req);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        Ok(remove_by(&mut *write(&self.food_requests)?, |r| r.id == id))
    }
}

#[async_trait]
impl MyFoodRequestRepo for MemoryStore {
    async fn insert(&self, req: NewMyFoodRequest) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        write(&self.my_food_requests)?.push(req.into_request(id));
        Ok(id)
    }

    async fn find(&self, filter: &MyFoodRequestFilter) -> anyhow::Result<Vec<MyFoodRequest>> {
        Ok(read(&self.my_food_requests)?
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MyFoodRequest>> {
        Ok(read(&self.my_food_requests)?
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, patch: MyFoodRequestPatch) -> anyhow::Result<u64> {
        let mut requests = write(&self.my_food_requests)?;
        match requests.iter_mut().find(|r| r.id == id) {
            Some(req) => {
                patch.apply(req);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        Ok(remove_by(&mut *write(&self.my_food_requests)?, |r| r.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn new_food(name: &str, quantity: &str) -> NewFood {
        NewFood {
            food_name: name.into(),
            food_img_url: String::new(),
            quantity: quantity.into(),
            location: String::new(),
            expire_date: String::new(),
            donator_name: String::new(),
            donator_email: "dana@example.com".into(),
            donator_image_url: String::new(),
            description: String::new(),
            status: "available".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn food_crud_round() {
        let store = MemoryStore::new();
        let id = FoodRepo::insert(&store, new_food("Rice", "3")).await.unwrap();

        let got = FoodRepo::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(got.food_name, "Rice");

        let patch = FoodPatch {
            quantity: Some("5".into()),
            ..Default::default()
        };
        assert_eq!(FoodRepo::update(&store, id, patch).await.unwrap(), 1);
        let got = FoodRepo::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(got.quantity, "5");
        assert_eq!(got.food_name, "Rice");

        assert_eq!(FoodRepo::delete(&store, id).await.unwrap(), 1);
        assert_eq!(FoodRepo::delete(&store, id).await.unwrap(), 0);
        assert!(FoodRepo::find_by_id(&store, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_matches_nothing() {
        let store = MemoryStore::new();
        let patch = FoodPatch {
            status: Some("gone".into()),
            ..Default::default()
        };
        assert_eq!(FoodRepo::update(&store, Uuid::new_v4(), patch).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_by_ids_skips_unknown() {
        let store = MemoryStore::new();
        let a = FoodRepo::insert(&store, new_food("A", "1")).await.unwrap();
        let _b = FoodRepo::insert(&store, new_food("B", "1")).await.unwrap();
        let found = store.find_by_ids(&[a, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a);
    }

    #[tokio::test]
    async fn food_requests_filter_by_food() {
        let store = MemoryStore::new();
        let food_id = Uuid::new_v4();
        for fid in [food_id, Uuid::new_v4()] {
            FoodRequestRepo::insert(
                &store,
                NewFoodRequest {
                    food_id: fid,
                    requested_date: OffsetDateTime::now_utc(),
                    expire_date: String::new(),
                    requester_name: String::new(),
                    requester_email: "r@example.com".into(),
                    requester_image_url: String::new(),
                    requester_message: String::new(),
                    donation_amount: None,
                    status: "pending".into(),
                },
            )
            .await
            .unwrap();
        }
        let filter = FoodRequestFilter {
            food_id: Some(food_id),
            ..Default::default()
        };
        let found = FoodRequestRepo::find(&store, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].food_id, food_id);
    }
}
