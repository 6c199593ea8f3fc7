pub(crate) mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::FoodRequestRepo;
pub use repo_types::FoodRequest;

pub fn router() -> Router<AppState> {
    handlers::food_request_routes()
}
