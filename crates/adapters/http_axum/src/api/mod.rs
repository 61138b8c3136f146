//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod products;

use axum::Router;
use axum::routing::get;

use inventory_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the products sub-router. Mounted by [`crate::router::build`].
pub fn routes<PR>() -> Router<AppState<PR>>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/products",
            get(products::list::<PR>).post(products::create::<PR>),
        )
        .route(
            "/products/{id}",
            get(products::get::<PR>)
                .put(products::replace::<PR>)
                .patch(products::patch::<PR>)
                .delete(products::delete::<PR>),
        )
}
