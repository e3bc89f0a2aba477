//! Cashier routes.

use super::{
    AppState, created,
    extract::{JsonBody, Path},
};
use crate::{
    core::{cashier, summary::{CashierSummary, summarize_cashier}},
    entities,
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use serde::Deserialize;

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierInput {
    first_name: String,
    last_name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cashiers", post(create))
        .route("/cashiers/{id}", get(get_by_id).put(update).delete(delete))
}

/// POST /cashiers
async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CashierInput>,
) -> Result<Response> {
    let cashier =
        cashier::create_cashier(&state.database, &input.first_name, &input.last_name).await?;
    Ok(created(&format!("/cashiers/{}", cashier.id), cashier))
}

/// GET /cashiers/{id} - cashier with all orders summarized
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CashierSummary>> {
    let snapshot = cashier::load_cashier_snapshot(&state.database, id)
        .await?
        .ok_or(Error::CashierNotFound { id })?;
    Ok(Json(summarize_cashier(&snapshot)))
}

/// PUT /cashiers/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<CashierInput>,
) -> Result<Json<entities::cashier::Model>> {
    cashier::update_cashier(&state.database, id, &input.first_name, &input.last_name)
        .await
        .map(Json)
}

/// DELETE /cashiers/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    cashier::delete_cashier(&state.database, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
