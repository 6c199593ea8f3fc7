mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::MyFoodRequestRepo;
pub use repo_types::MyFoodRequest;

pub fn router() -> Router<AppState> {
    handlers::my_food_request_routes()
}
