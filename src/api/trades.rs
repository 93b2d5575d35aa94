use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::display::{paginate, TradeRow, PAGE_SIZE_OPTIONS};
use crate::domain::{TradeId, TradeKey, TradeRecord, Version};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsResponse {
    pub rows: Vec<TradeRow>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Every record, in source order.
pub async fn get_trades(State(state): State<AppState>) -> Json<Vec<TradeRecord>> {
    Json(state.store.records().to_vec())
}

pub async fn get_trade(
    Path((trade_id, version)): Path<(u64, u64)>,
    State(state): State<AppState>,
) -> Result<Json<TradeRecord>, AppError> {
    let trade_id =
        TradeId::new(trade_id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let version = Version::new(version).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let key = TradeKey::new(trade_id, version);

    state
        .store
        .get(key)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Trade {}", key)))
}

/// Sorted, formatted table rows, one page at a time.
pub async fn get_trade_rows(
    Query(params): Query<RowsQuery>,
    State(state): State<AppState>,
) -> Result<Json<RowsResponse>, AppError> {
    let page = params.page.unwrap_or(0);
    let page_size = params.page_size.unwrap_or(state.config.page_size);
    if !PAGE_SIZE_OPTIONS.contains(&page_size) {
        return Err(AppError::BadRequest(format!(
            "pageSize must be one of {:?}",
            PAGE_SIZE_OPTIONS
        )));
    }

    let now = Utc::now();
    let rows: Vec<TradeRow> = state
        .store
        .sorted()
        .iter()
        .map(|trade| TradeRow::from_trade(trade, now))
        .collect();
    let total = rows.len();

    Ok(Json(RowsResponse {
        rows: paginate(&rows, page, page_size).to_vec(),
        total,
        page,
        page_size,
    }))
}
