use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use coinboard_core::checkout::{CheckoutForm, CheckoutReceipt, CheckoutServiceTrait};

use crate::{error::ApiResult, main_lib::AppState};

async fn submit_checkout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<CheckoutForm>,
) -> ApiResult<Json<CheckoutReceipt>> {
    let receipt = state.checkout_service.submit(&form)?;
    Ok(Json(receipt))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/checkout", post(submit_checkout))
}
