use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateMyRequestBody, MyFoodRequestQuery},
    repo_types::{MyFoodRequest, MyFoodRequestPatch},
};
use crate::{
    auth::AuthUser,
    common::{created, parse_id, DeleteResult, InsertOneResult, UpdateResult},
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    food_requests::dto::UpdateRequestBody,
    state::AppState,
};

pub fn my_food_request_routes() -> Router<AppState> {
    Router::new()
        .route("/myFoodRequests", get(list_my_requests).post(create_my_request))
        .route(
            "/myFoodRequests/:id",
            get(get_my_request)
                .put(update_my_request)
                .delete(delete_my_request),
        )
}

/// Only the requester or the donor may touch a document. A missing
/// document passes, so writes on it report zero counts.
async fn ensure_involved(state: &AppState, id: Uuid, user: &AuthUser) -> ApiResult<()> {
    match state.my_food_requests.find_by_id(id).await? {
        Some(existing) if !existing.involves(&user.email) => {
            warn!(%id, email = %user.email, "not a party to this request");
            Err(ApiError::Forbidden)
        }
        _ => Ok(()),
    }
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn create_my_request(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<CreateMyRequestBody>,
) -> ApiResult<(StatusCode, HeaderMap, Json<InsertOneResult>)> {
    let new_request = body.into_new_request(&user.email, OffsetDateTime::now_utc())?;
    let id = state.my_food_requests.insert(new_request).await?;
    info!(%id, "my food request created");
    Ok(created("myFoodRequests", id))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn list_my_requests(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(q): ApiQuery<MyFoodRequestQuery>,
) -> ApiResult<Json<Vec<MyFoodRequest>>> {
    let filter = q.into_filter(&user.email)?;
    let requests = state.my_food_requests.find(&filter).await?;
    Ok(Json(requests))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn get_my_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MyFoodRequest>> {
    let id = parse_id(&id)?;
    let found = state
        .my_food_requests
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Food request"))?;
    if !found.involves(&user.email) {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(found))
}

#[instrument(skip(state, user, body), fields(email = %user.email))]
pub async fn update_my_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateRequestBody>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let patch = MyFoodRequestPatch::try_from(body)?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".into()));
    }
    ensure_involved(&state, id, &user).await?;
    let matched = state.my_food_requests.update(id, patch).await?;
    info!(%id, matched, "my food request updated");
    Ok(Json(UpdateResult::matched(matched)))
}

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn delete_my_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    ensure_involved(&state, id, &user).await?;
    let deleted = state.my_food_requests.delete(id).await?;
    info!(%id, deleted, "my food request deleted");
    Ok(Json(DeleteResult::deleted(deleted)))
}
