use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{CreateFoodRequest, FoodQuery, UpdateFoodRequest},
    repo_types::{Food, FoodFilter, FoodOrder, FoodPatch},
};
use crate::{
    auth::AuthUser,
    common::{created, parse_id, DeleteResult, InsertOneResult, UpdateResult},
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
        .route("/foods/sort/:sort_method", get(sorted_foods))
        .route("/featuredFoods", get(featured_foods))
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn create_food(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(mut body): ApiJson<CreateFoodRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<InsertOneResult>)> {
    if body.donator_email.trim().is_empty() {
        body.donator_email = user.email;
    }
    let id = state
        .foods
        .insert(body.into_new_food(OffsetDateTime::now_utc()))
        .await?;
    info!(%id, "food created");
    Ok(created("foods", id))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<FoodQuery>,
) -> ApiResult<Json<Vec<Food>>> {
    let filter = FoodFilter::from(q);
    let foods = state.foods.find(&filter, FoodOrder::Natural, None).await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Food>> {
    let id = parse_id(&id)?;
    state
        .foods
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Food"))
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn update_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateFoodRequest>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let patch = FoodPatch::from(body);
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".into()));
    }
    let matched = state.foods.update(id, patch).await?;
    info!(%id, matched, "food updated");
    Ok(Json(UpdateResult::matched(matched)))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn delete_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let deleted = state.foods.delete(id).await?;
    info!(%id, deleted, "food deleted");
    Ok(Json(DeleteResult::deleted(deleted)))
}

#[instrument(skip(state))]
pub async fn sorted_foods(
    State(state): State<AppState>,
    Path(sort_method): Path<String>,
) -> ApiResult<Json<Vec<Food>>> {
    let order = FoodOrder::from_sort_method(&sort_method);
    let foods = state
        .foods
        .find(&FoodFilter::default(), order, None)
        .await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn featured_foods(State(state): State<AppState>) -> ApiResult<Json<Vec<Food>>> {
    let foods = state
        .foods
        .find(
            &FoodFilter::default(),
            FoodOrder::QuantityDesc,
            Some(state.config.featured_limit),
        )
        .await?;
    Ok(Json(foods))
}
