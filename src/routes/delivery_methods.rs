use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::delivery::DeliveryMethodList, error::AppResult, response::ApiResponse,
    services::delivery_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_delivery_methods))
}

#[utoipa::path(
    get,
    path = "/api/delivery_methods",
    responses(
        (status = 200, description = "Available delivery methods", body = ApiResponse<DeliveryMethodList>)
    ),
    tag = "Delivery"
)]
pub async fn list_delivery_methods(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DeliveryMethodList>>> {
    let resp = delivery_service::list_delivery_methods(&state).await?;
    Ok(Json(resp))
}
