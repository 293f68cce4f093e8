use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

mod ai;
mod analytics;
mod auth;
mod error;
mod routes;
mod shopify;
mod storage;

use auth::AuthKeys;
use shopify::ShopifyConfig;
use storage::{SharedStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub auth: AuthKeys,
    pub http: reqwest::Client,
    pub ai_api_key: Option<String>,
    pub shopify: Option<ShopifyConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let data_path = std::env::var("VOXELROOM_DATA").unwrap_or_else(|_| "data/store.json".into());
    let store = match Store::open(data_path.clone().into()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store at {data_path}: {e}");
            return;
        }
    };

    let token_secret = std::env::var("VOXELROOM_TOKEN_SECRET").ok();
    let auth = match AuthKeys::new(token_secret.as_deref()) {
        Ok(auth) => auth,
        Err(e) => {
            tracing::error!("Failed to initialize signing key: {e}");
            return;
        }
    };

    let state = AppState {
        store: store.into_shared(),
        auth,
        http: reqwest::Client::new(),
        ai_api_key: std::env::var("OPENROUTER_API_KEY").ok(),
        shopify: ShopifyConfig::from_env(),
    };

    spawn_shopify_schedule(&state);

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/register", post(routes::register))
        .route("/login", post(routes::login))
        .route(
            "/marketplace",
            get(routes::list_marketplace).post(routes::create_listing),
        )
        .route(
            "/marketplace/{id}",
            put(routes::update_listing)
                .patch(routes::update_listing)
                .delete(routes::delete_listing),
        )
        .route("/save-room", post(routes::save_room))
        .route("/load-room/{user_id}", get(routes::load_room))
        .route("/user-cart", post(routes::set_cart))
        .route("/user-cart/{email}", get(routes::get_cart))
        .route("/analytics", post(routes::record_event))
        .route("/recommendations/{user_id}", get(routes::get_recommendations))
        .route(
            "/seller-analytics/{seller_email}",
            get(routes::get_seller_analytics),
        )
        .route("/track-purchase", post(routes::track_purchase))
        .route("/api/openrouter", post(routes::generate))
        .route("/api/shopify/sync", post(routes::shopify_sync))
        .route("/api/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("VOXELROOM_ADDR").unwrap_or_else(|_| "0.0.0.0:5001".into());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            return;
        }
    };
    tracing::info!("Server running on http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
    }
}

/// Mirror the Shopify catalog on a fixed interval when configured.
fn spawn_shopify_schedule(state: &AppState) {
    if state.shopify.is_none() {
        return;
    }
    let secs = std::env::var("SHOPIFY_SYNC_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3600);

    let state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(secs));
        loop {
            interval.tick().await;
            if let Err(e) = routes::run_shopify_sync(&state).await {
                tracing::warn!("Scheduled Shopify sync failed: {e}");
            }
        }
    });
}
