//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use inventory_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// The products API is mounted at the root and again under `/api`, which is
/// where the web frontend expects it. When `static_dir` is given, any request
/// no API route matches is served from that directory.
///
/// Cross-origin requests are accepted from any origin. A [`TraceLayer`] logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<PR>(state: AppState<PR>, static_dir: Option<&Path>) -> Router
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes::<PR>())
        .nest("/api", crate::api::routes::<PR>());

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
