//! Product routes.

use super::{
    AppState, created,
    extract::{JsonBody, Path, Query},
};
use crate::{
    core::{
        product,
        query::{ProductListing, search_products},
    },
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of create and update requests. Updates replace every field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    product_name: String,
    #[serde(default)]
    brand: String,
    price: Decimal,
    category_id: i64,
}

/// Query string of the product list.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    search: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", put(update).delete(delete))
}

async fn listing(state: &AppState, id: i64) -> Result<ProductListing> {
    product::load_product_snapshot(&state.database, id)
        .await?
        .map(|snapshot| ProductListing::from(&snapshot))
        .ok_or(Error::ProductNotFound { id })
}

/// GET /products?search=
async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductListing>>> {
    let products = product::load_product_snapshots(&state.database).await?;
    let matched = search_products(products, query.search.as_deref());
    Ok(Json(matched.iter().map(ProductListing::from).collect()))
}

/// POST /products
async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Response> {
    let product = product::create_product(
        &state.database,
        &input.product_name,
        &input.brand,
        input.price,
        input.category_id,
    )
    .await?;

    let body = listing(&state, product.id).await?;
    Ok(created(&format!("/products/{}", product.id), body))
}

/// PUT /products/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Json<ProductListing>> {
    product::update_product(
        &state.database,
        id,
        &input.product_name,
        &input.brand,
        input.price,
        input.category_id,
    )
    .await?;

    listing(&state, id).await.map(Json)
}

/// DELETE /products/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    product::delete_product(&state.database, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
