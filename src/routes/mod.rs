//! Router assembly.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Full application: common routes, `/api`, and uploaded files under the media prefix.
/// CORS is wide open so the training frontend can call from any origin.
pub fn app(state: AppState) -> Router {
    let media = ServeDir::new(&state.settings.media_root);
    let media_mount = state.settings.media_mount().to_string();
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .nest_service(&media_mount, media)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
