use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api::response::PAGINATION_HEADERS;
use crate::handlers;
use crate::middleware::{handle_panic, jwt_auth_middleware, role_guard};
use crate::state::AppState;

/// The full HTTP application for `state`.
pub fn build_app(state: AppState) -> Router {
    let images_dir = state.image_storage.dir().to_path_buf();
    let max_request_size = state.config.api.max_request_size_bytes;

    Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(auth_routes())
        .nest_service("/images", ServeDir::new(images_dir))
        // Protected API
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(cors_layer(&state.config.security.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

/// Routes behind JWT validation and the role guard.
fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::{difficulties, images, regions, walks};

    Router::new()
        .route("/api/regions", get(regions::list).post(regions::create))
        .route(
            "/api/regions/:id",
            get(regions::get).put(regions::update).delete(regions::delete),
        )
        .route("/api/walks", get(walks::list).post(walks::create))
        .route(
            "/api/walks/:id",
            get(walks::get).put(walks::update).delete(walks::delete),
        )
        .route("/api/difficulties", get(difficulties::list))
        .route("/api/images/upload", post(images::upload))
        // Layers run bottom-up: authenticate, then check roles.
        .route_layer(from_fn(role_guard))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(PAGINATION_HEADERS);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
