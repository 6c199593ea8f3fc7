pub mod app;
pub mod auth;
pub mod common;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod food_requests;
pub mod foods;
pub mod memory;
pub mod my_food_requests;
pub mod state;
