use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::repo_types::{Food, FoodFilter, FoodOrder, FoodPatch, NewFood};
use crate::db::{contains_pattern, PgStore};

/// Data access for the `foods` collection.
#[async_trait]
pub trait FoodRepo: Send + Sync {
    async fn insert(&self, food: NewFood) -> anyhow::Result<Uuid>;
    async fn find(
        &self,
        filter: &FoodFilter,
        order: FoodOrder,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<Food>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Food>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Food>>;
    /// Returns the number of matched documents.
    async fn update(&self, id: Uuid, patch: FoodPatch) -> anyhow::Result<u64>;
    /// Returns the number of deleted documents.
    async fn delete(&self, id: Uuid) -> anyhow::Result<u64>;
}

const FOOD_COLUMNS: &str = "id, food_name, food_img_url, quantity, location, expire_date, \
     donator_name, donator_email, donator_image_url, description, status, created_at";

fn order_clause(order: FoodOrder) -> &'static str {
    match order {
        FoodOrder::Natural => " ORDER BY created_at ASC, id ASC",
        FoodOrder::ExpireDateAsc => " ORDER BY expire_date ASC, created_at ASC",
        FoodOrder::CreatedAtDesc => " ORDER BY created_at DESC",
        FoodOrder::QuantityDesc => {
            r" ORDER BY substring(quantity from '^\s*(\d+)')::numeric DESC NULLS LAST, created_at ASC"
        }
    }
}

#[async_trait]
impl FoodRepo for PgStore {
    async fn insert(&self, food: NewFood) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO foods (id, food_name, food_img_url, quantity, location, expire_date,
                               donator_name, donator_email, donator_image_url, description,
                               status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(&food.food_name)
        .bind(&food.food_img_url)
        .bind(&food.quantity)
        .bind(&food.location)
        .bind(&food.expire_date)
        .bind(&food.donator_name)
        .bind(&food.donator_email)
        .bind(&food.donator_image_url)
        .bind(&food.description)
        .bind(&food.status)
        .bind(food.created_at)
        .execute(&self.db)
        .await
        .context("insert food")?;
        Ok(id)
    }

    async fn find(
        &self,
        filter: &FoodFilter,
        order: FoodOrder,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<Food>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {FOOD_COLUMNS} FROM foods WHERE TRUE"));
        if let Some(search) = &filter.search {
            qb.push(" AND food_name ILIKE ")
                .push_bind(contains_pattern(search));
        }
        if let Some(status) = &filter.status {
            qb.push(" AND lower(status) = lower(")
                .push_bind(status.clone())
                .push(")");
        }
        if let Some(email) = &filter.donator_email {
            qb.push(" AND lower(donator_email) = lower(")
                .push_bind(email.clone())
                .push(")");
        }
        qb.push(order_clause(order));
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit.max(0));
        }

        let rows = qb
            .build_query_as::<Food>()
            .fetch_all(&self.db)
            .await
            .context("find foods")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        let row = sqlx::query_as::<_, Food>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find food by id")?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Food>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Food>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await
        .context("find foods by ids")?;
        Ok(rows)
    }

    async fn update(&self, id: Uuid, patch: FoodPatch) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE foods SET
                food_name         = COALESCE($2, food_name),
                food_img_url      = COALESCE($3, food_img_url),
                quantity          = COALESCE($4, quantity),
                location          = COALESCE($5, location),
                expire_date       = COALESCE($6, expire_date),
                donator_name      = COALESCE($7, donator_name),
                donator_email     = COALESCE($8, donator_email),
                donator_image_url = COALESCE($9, donator_image_url),
                description       = COALESCE($10, description),
                status            = COALESCE($11, status)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.food_name)
        .bind(patch.food_img_url)
        .bind(patch.quantity)
        .bind(patch.location)
        .bind(patch.expire_date)
        .bind(patch.donator_name)
        .bind(patch.donator_email)
        .bind(patch.donator_image_url)
        .bind(patch.description)
        .bind(patch.status)
        .execute(&self.db)
        .await
        .context("update food")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete food")?;
        Ok(res.rows_affected())
    }
}
