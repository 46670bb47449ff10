pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use auth::jwks::JwksClient;
use config::Config;
use db::store::DrinkStore;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub jwks: JwksClient,
    pub config: Arc<Config>,
}
