use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::repo_types::{MyFoodRequest, MyFoodRequestFilter, MyFoodRequestPatch, NewMyFoodRequest};
use crate::db::PgStore;

/// Data access for the `myFoodRequests` collection.
#[async_trait]
pub trait MyFoodRequestRepo: Send + Sync {
    async fn insert(&self, req: NewMyFoodRequest) -> anyhow::Result<Uuid>;
    async fn find(&self, filter: &MyFoodRequestFilter) -> anyhow::Result<Vec<MyFoodRequest>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MyFoodRequest>>;
    async fn update(&self, id: Uuid, patch: MyFoodRequestPatch) -> anyhow::Result<u64>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<u64>;
}

const MY_REQUEST_COLUMNS: &str = "id, food_id, food_name, food_img_url, location, donator_name, \
     donator_email, donator_image_url, requested_date, expire_date, requester_name, \
     requester_email, requester_image_url, requester_message, donation_amount, status";

#[async_trait]
impl MyFoodRequestRepo for PgStore {
    async fn insert(&self, req: NewMyFoodRequest) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO my_food_requests (id, food_id, food_name, food_img_url, location,
                                          donator_name, donator_email, donator_image_url,
                                          requested_date, expire_date, requester_name,
                                          requester_email, requester_image_url,
                                          requester_message, donation_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(id)
        .bind(req.food_id)
        .bind(&req.food_name)
        .bind(&req.food_img_url)
        .bind(&req.location)
        .bind(&req.donator_name)
        .bind(&req.donator_email)
        .bind(&req.donator_image_url)
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
        .context("insert my food request")?;
        Ok(id)
    }

    async fn find(&self, filter: &MyFoodRequestFilter) -> anyhow::Result<Vec<MyFoodRequest>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {MY_REQUEST_COLUMNS} FROM my_food_requests WHERE TRUE"
        ));
        if let Some(email) = &filter.requester_email {
            qb.push(" AND lower(requester_email) = lower(")
                .push_bind(email.clone())
                .push(")");
        }
        if let Some(email) = &filter.donator_email {
            qb.push(" AND lower(donator_email) = lower(")
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
            .build_query_as::<MyFoodRequest>()
            .fetch_all(&self.db)
            .await
            .context("find my food requests")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MyFoodRequest>> {
        let row = sqlx::query_as::<_, MyFoodRequest>(&format!(
            "SELECT {MY_REQUEST_COLUMNS} FROM my_food_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find my food request by id")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: MyFoodRequestPatch) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE my_food_requests SET
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
        .context("update my food request")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM my_food_requests WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete my food request")?;
        Ok(res.rows_affected())
    }
}
