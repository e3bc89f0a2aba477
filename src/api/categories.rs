//! Category routes.

use super::{AppState, created, extract::JsonBody};
use crate::{core::category, entities, errors::Result};
use axum::{Json, Router, extract::State, response::Response, routing::get};
use serde::Deserialize;

/// Body of a create request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    category_name: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list).post(create))
}

/// GET /categories
async fn list(State(state): State<AppState>) -> Result<Json<Vec<entities::category::Model>>> {
    category::get_all_categories(&state.database).await.map(Json)
}

/// POST /categories
async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Response> {
    let category = category::create_category(&state.database, &input.category_name).await?;
    Ok(created(&format!("/categories/{}", category.id), category))
}
