//! # drydock-api
//!
//! axum HTTP boundary over [`drydock_db::RepairService`].
//!
//! Every route except `/health` sits behind the `x-api-key` check, which is
//! disabled when no key is configured.

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use drydock_config::{DrydockConfig, GeneralConfig, ServerConfig};
use drydock_db::RepairService;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RepairService>,
    pub general: GeneralConfig,
    /// `None` disables the header check.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn new(service: RepairService, config: &DrydockConfig) -> Self {
        let api_key = config
            .server
            .requires_api_key()
            .then(|| Arc::from(config.server.api_key.as_str()));
        Self {
            service: Arc::new(service),
            general: config.general.clone(),
            api_key,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let protected = Router::new()
        .route(
            "/repairs",
            post(routes::repairs::create_repair).get(routes::repairs::list_repairs),
        )
        .route(
            "/repairs/:repair_uid",
            get(routes::repairs::get_repair).patch(routes::repairs::update_repair),
        )
        .route(
            "/repairs/:repair_uid/component-changes",
            post(routes::changes::add_component_change),
        )
        .route(
            "/component-changes/:id",
            delete(routes::changes::remove_component_change),
        )
        .route(
            "/repairs/:repair_uid/config-changes",
            post(routes::changes::add_config_change),
        )
        .route(
            "/config-changes/:id",
            delete(routes::changes::remove_config_change),
        )
        .route(
            "/checklist-items",
            get(routes::checklist::list_checklist_items),
        )
        .route(
            "/repairs/:repair_uid/checklist",
            put(routes::checklist::put_repair_checklist),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
