pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod images;
pub mod middleware;
pub mod query;
pub mod state;

pub use app::build_app;
pub use state::AppState;
