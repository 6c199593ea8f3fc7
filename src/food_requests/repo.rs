use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::repo_types::{FoodRequest, FoodRequestFilter, FoodRequestPatch, NewFoodRequest};
use crate::db::PgStore;

/// Data access for the `foodRequests` collection.
#[async_trait]
pub trait FoodRequestRepo: Send + Sync {
    async fn insert(&self, req: NewFoodRequest) -> anyhow::Result<Uuid>;
    async fn find(&self, filter: &FoodRequestFilter) -> anyhow::Result<Vec<FoodRequest>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<FoodRequest>>;
    async fn update(&self, id: Uuid, patch: FoodRequestPatch) -> anyhow::Result<u64>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<u64>;
}

const REQUEST_COLUMNS: &str = "id, food_id, requested_date, expire_date, requester_name, \
     requester_email, requester_image_url, requester_message, donation_amount, status";

#[async_trait]
impl FoodRequestRepo for PgStore {
    async fn insert(&self, req: NewFoodRequest) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO food_requests (id, food_id, requested_date, expire_date, requester_name,
                                       requester_email, requester_image_url, requester_message,
                                       donation_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(req.food_id)
        .bind(req.requested_date)
        .bind(&req.expire_date)
        .bind(&req.requester_name)
        .bind(&req.requester_email)
        .bind(&req.requester_image_url)
        .bind(&req.requester_message)
        .bind(req.donation_amount)
        .bind(&req.status)
        .execute(&self.db)
        .await
        .context("insert food request")?;
        Ok(id)
    }

    async fn find(&self, filter: &FoodRequestFilter) -> anyhow::Result<Vec<FoodRequest>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {REQUEST_COLUMNS} FROM food_requests WHERE TRUE"
        ));
        if let Some(food_id) = filter.food_id {
            qb.push(" AND food_id = ").push_bind(food_id);
        }
        if let Some(email) = &filter.requester_email {
            qb.push(" AND lower(requester_email) = lower(")
                .push_bind(email.clone())
                .push(")");
        }
        if let Some(status) = &filter.status {
            qb.push(" AND lower(status) = lower(")
                .push_bind(status.clone())
                .push(")");
        }
        qb.push(" ORDER BY requested_date ASC, id ASC");

        let rows = qb
            .build_query_as::<FoodRequest>()
            .fetch_all(&self.db)
            .await
            .context("find food requests")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<FoodRequest>> {
        let row = sqlx::query_as::<_, FoodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM food_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find food request by id")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: FoodRequestPatch) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE food_requests SET
                expire_date       = COALESCE($2, expire_date),
                requester_message = COALESCE($3, requester_message),
                donation_amount   = CASE WHEN $4 THEN $5 ELSE donation_amount END,
                status            = COALESCE($6, status)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.expire_date)
        .bind(patch.requester_message)
        .bind(patch.donation_amount.is_some())
        .bind(patch.donation_amount.flatten())
        .bind(patch.status)
        .execute(&self.db)
        .await
        .context("update food request")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM food_requests WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete food request")?;
        Ok(res.rows_affected())
    }
}
