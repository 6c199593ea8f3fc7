mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::FoodRepo;
pub use repo_types::Food;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
