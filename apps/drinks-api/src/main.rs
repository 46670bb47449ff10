use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drinks_api::auth::jwks::JwksClient;
use drinks_api::config::Config;
use drinks_api::db::pg::PgDrinkStore;
use drinks_api::db::store::DrinkStore;
use drinks_api::AppState;

#[tokio::main]
async fn main() {
    // Load .env file (silently skip if missing — env vars may be set externally)
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;

    // Connect to PostgreSQL.
    let pool = drinks_api::db::pool::connect(&config.database_url).await;
    let store: Arc<dyn DrinkStore> = Arc::new(PgDrinkStore::new(pool));

    // JWKS client for validating identity-provider access tokens.
    let jwks = JwksClient::new(&config.jwks_origin());

    tracing::info!(
        auth_domain = %config.auth_domain,
        api_audience = %config.api_audience,
        "drinks-api configured"
    );

    let state = AppState {
        store,
        jwks,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(drinks_api::routes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "drinks-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
