//! JSON REST handlers for products.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use inventory_app::ports::ProductRepository;
use inventory_domain::error::{InventoryError, ValidationError};
use inventory_domain::id::ProductId;
use inventory_domain::product::{Product, ProductPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Product>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, replace and patch endpoints.
pub enum GetResponse {
    Ok(Json<Product>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Product>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_str(raw).map_err(|_| {
        ApiError::from(InventoryError::from(ValidationError::InvalidId(
            raw.to_string(),
        )))
    })
}

/// `GET /products`
pub async fn list<PR>(State(state): State<AppState<PR>>) -> Result<ListResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let products = state.product_service.list_products().await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `GET /products/:id`
pub async fn get<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let product = state.product_service.get_product(product_id).await?;
    Ok(GetResponse::Ok(Json(product)))
}

/// `POST /products`
pub async fn create<PR>(
    State(state): State<AppState<PR>>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let Json(product) = payload?;
    let created = state.product_service.create_product(product).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /products/:id`
///
/// Every attribute missing from the body is cleared.
pub async fn replace<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<String>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let Json(details) = payload?;
    let saved = state
        .product_service
        .replace_product(product_id, details)
        .await?;
    Ok(GetResponse::Ok(Json(saved)))
}

/// `PATCH /products/:id`
///
/// Only attributes present and non-null in the body are applied.
pub async fn patch<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let Json(patch) = payload?;
    let saved = state.product_service.patch_product(product_id, patch).await?;
    Ok(GetResponse::Ok(Json(saved)))
}

/// `DELETE /products/:id`
pub async fn delete<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    PR: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    state.product_service.delete_product(product_id).await?;
    Ok(DeleteResponse::NoContent)
}
