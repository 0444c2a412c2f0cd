use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, JwtAuthService, MemoryRevocationStore, ParkingLotService, RedisRevocationStore,
    RevocationStore, SeaOrmParkingLotService, TokenSigner,
};

pub mod auth;
mod error;
mod parking_lots;
mod types;
mod users;
mod vehicles;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,

    pub lots: Arc<dyn ParkingLotService>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.auth
    }

    #[must_use]
    pub fn lots(&self) -> &Arc<dyn ParkingLotService> {
        &self.lots
    }
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    let revocation: Arc<dyn RevocationStore> = match &config.redis.url {
        Some(url) => {
            info!("Using redis revocation store");
            Arc::new(RedisRevocationStore::connect(url).await?)
        }
        None => {
            info!("Using in-process revocation store");
            Arc::new(MemoryRevocationStore::new())
        }
    };

    let signer = TokenSigner::new(&config.auth);
    let auth: Arc<dyn AuthService> =
        Arc::new(JwtAuthService::new(store.clone(), revocation, signer));
    let lots: Arc<dyn ParkingLotService> = Arc::new(SeaOrmParkingLotService::new(store.clone()));

    Ok(Arc::new(AppState {
        config: Arc::new(RwLock::new(config)),
        store,
        auth,
        lots,
    }))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/logout", post(auth::logout))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", put(users::update_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/parking_lots", get(parking_lots::list_parking_lots))
        .route("/parking_lots", post(parking_lots::create_parking_lot))
        .route("/parking_lots/{id}", get(parking_lots::get_parking_lot))
        .route("/parking_lots/{id}", put(parking_lots::update_parking_lot))
        .route(
            "/parking_lots/{id}",
            delete(parking_lots::delete_parking_lot),
        )
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles", post(vehicles::create_vehicle))
        .route("/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/vehicles/{id}", delete(vehicles::delete_vehicle))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/register", post(users::register))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
