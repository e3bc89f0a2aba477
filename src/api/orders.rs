//! Order routes.

use super::{
    AppState, created,
    extract::{JsonBody, Path, Query},
};
use crate::{
    core::{
        order::{self, NewLineItem},
        summary::{OrderSummary, summarize_order},
    },
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Body of a create request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    cashier_id: i64,
    #[serde(default)]
    products: Vec<NewLineItem>,
}

/// Response to a create request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    order_id: i64,
}

/// Query string of the order list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDateQuery {
    order_date: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/{id}", get(get_by_id).delete(delete))
}

/// Accepts `YYYY-MM-DD` or a naive datetime, keeping only the date. Blank means
/// no filter.
fn parse_order_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<NaiveDate>()
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|dt| dt.date()))
        .map(Some)
        .map_err(|_| Error::Validation {
            message: format!("Invalid orderDate '{raw}'"),
        })
}

/// GET /orders?orderDate=
async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderDateQuery>,
) -> Result<Json<Vec<OrderSummary>>> {
    let date = parse_order_date(query.order_date.as_deref())?;
    let orders = order::list_orders(&state.database, date).await?;
    Ok(Json(orders.iter().map(summarize_order).collect()))
}

/// GET /orders/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderSummary>> {
    let snapshot = order::load_order_snapshot(&state.database, id)
        .await?
        .ok_or(Error::OrderNotFound { id })?;
    Ok(Json(summarize_order(&snapshot)))
}

/// POST /orders
async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<OrderInput>,
) -> Result<Response> {
    let created_order =
        order::create_order(&state.database, input.cashier_id, &input.products).await?;
    Ok(created(
        &format!("/orders/{}", created_order.id),
        OrderCreated {
            order_id: created_order.id,
        },
    ))
}

/// DELETE /orders/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    order::delete_order(&state.database, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
