use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use super::{
    dto::{CreateRequestBody, FoodRequestQuery, UpdateRequestBody},
    repo_types::{FoodRequest, FoodRequestFilter, FoodRequestPatch, FoodRequestWithFood},
    services::{join_with_foods, referenced_food_ids},
};
use crate::{
    auth::AuthUser,
    common::{created, parse_id, DeleteResult, InsertOneResult, UpdateResult},
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

pub fn food_request_routes() -> Router<AppState> {
    Router::new()
        .route("/foodRequests", get(list_requests).post(create_request))
        .route("/foodRequests/joined", get(joined_requests))
        .route(
            "/foodRequests/:id",
            get(get_request).put(update_request).delete(delete_request),
        )
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<CreateRequestBody>,
) -> ApiResult<(StatusCode, HeaderMap, Json<InsertOneResult>)> {
    let new_request = body.into_new_request(&user.email, OffsetDateTime::now_utc())?;
    let food_id = new_request.food_id;
    let id = state.food_requests.insert(new_request).await?;
    info!(%id, %food_id, "food request created");
    Ok(created("foodRequests", id))
}

#[instrument(skip(state, _user))]
pub async fn list_requests(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(q): ApiQuery<FoodRequestQuery>,
) -> ApiResult<Json<Vec<FoodRequest>>> {
    let filter = FoodRequestFilter::try_from(q)?;
    let requests = state.food_requests.find(&filter).await?;
    Ok(Json(requests))
}

/// Requests with their listing embedded under `food`.
#[instrument(skip(state, _user))]
pub async fn joined_requests(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(q): ApiQuery<FoodRequestQuery>,
) -> ApiResult<Json<Vec<FoodRequestWithFood>>> {
    let filter = FoodRequestFilter::try_from(q)?;
    let requests = state.food_requests.find(&filter).await?;
    let food_ids = referenced_food_ids(&requests);
    let foods = state.foods.find_by_ids(&food_ids).await?;
    debug!(requests = requests.len(), foods = foods.len(), "joining requests");
    Ok(Json(join_with_foods(requests, foods)))
}

#[instrument(skip(state, _user))]
pub async fn get_request(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<FoodRequest>> {
    let id = parse_id(&id)?;
    state
        .food_requests
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Food request"))
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn update_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateRequestBody>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let patch = FoodRequestPatch::try_from(body)?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".into()));
    }
    let matched = state.food_requests.update(id, patch).await?;
    info!(%id, matched, "food request updated");
    Ok(Json(UpdateResult::matched(matched)))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn delete_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let deleted = state.food_requests.delete(id).await?;
    info!(%id, deleted, "food request deleted");
    Ok(Json(DeleteResult::deleted(deleted)))
}
