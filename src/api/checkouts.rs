//! Global checkout listing endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::checkout::CheckoutDetails};

/// List all current checkouts, sorted ascending by due date
#[utoipa::path(
    get,
    path = "/checkouts",
    tag = "checkouts",
    responses(
        (status = 200, description = "All checkouts, earliest due first", body = Vec<CheckoutDetails>)
    )
)]
pub async fn list_checkouts(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CheckoutDetails>>> {
    let checkouts = state.services.library.list_checkouts().await?;
    Ok(Json(checkouts))
}
