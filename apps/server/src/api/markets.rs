use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use coinboard_core::refresh::RefreshServiceTrait;
use coinboard_market_data::MarketSnapshot;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{MarketsParams, MarketsResponse, RefreshResponse},
};

async fn get_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketsParams>,
) -> ApiResult<Json<MarketsResponse>> {
    let query = params.into_query()?;
    let dashboard = state.refresh_service.state();
    let empty = MarketSnapshot::default();
    let coins = dashboard.snapshot.as_deref().unwrap_or(&empty);
    let page = state.projector.project(coins, &query);
    Ok(Json(MarketsResponse::new(page, dashboard)))
}

async fn refresh_markets(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let outcome = state.refresh_service.force_refresh().await;
    tracing::info!("Manual refresh finished: {:?}", outcome);
    Json(RefreshResponse::from(outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/markets", get(get_markets))
        .route("/markets/refresh", post(refresh_markets))
}
