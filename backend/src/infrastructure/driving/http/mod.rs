use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

pub mod auth;
pub mod catalog;
pub mod files;
pub mod middleware;
pub mod properties;
pub mod users;

pub use auth::setup_routes as auth_routes;
pub use catalog::catalog_routes;
pub use files::files_routes;
pub use properties::properties_routes;
pub use users::users_routes;

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(allowed_origin.trim()) {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(_) => {
                tracing::warn!(origin = allowed_origin, "Ignoring malformed CORS origin");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };
    CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any)
}

/// The whole API plus the uploaded photos under `/uploads`.
pub fn router(state: AppState) -> Router {
    let settings = state.settings.clone();
    Router::new()
        .merge(auth_routes())
        .merge(users_routes())
        .merge(catalog_routes())
        .merge(properties_routes())
        .merge(files_routes(settings.storage.max_upload_bytes))
        .nest_service("/uploads", ServeDir::new(&settings.storage.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors.allowed_origin))
        .with_state(state)
}
