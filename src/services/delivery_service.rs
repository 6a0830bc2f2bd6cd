use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};
use serde_json::json;

use crate::{
    audit,
    dto::delivery::{CreateDeliveryMethodRequest, DeliveryMethodList},
    entity::delivery_methods::{
        ActiveModel as DeliveryMethodActive, Column as DeliveryMethodCol,
        Entity as DeliveryMethods, Model as DeliveryMethodModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::DeliveryMethod,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_delivery_methods(
    state: &AppState,
) -> AppResult<ApiResponse<DeliveryMethodList>> {
    let items = DeliveryMethods::find()
        .order_by_asc(DeliveryMethodCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(delivery_method_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Delivery methods",
        DeliveryMethodList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_delivery_method(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDeliveryMethodRequest,
) -> AppResult<ApiResponse<DeliveryMethod>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if payload.base_cost < 0 || payload.free_threshold.is_some_and(|t| t < 0) {
        return Err(AppError::BadRequest("costs must not be negative".into()));
    }

    let method = DeliveryMethodActive {
        id: NotSet,
        name: Set(name),
        description: Set(payload.description),
        base_cost: Set(payload.base_cost),
        free_threshold: Set(payload.free_threshold),
        estimated_days: Set(payload.estimated_days),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user.user_id,
        "delivery_method_create",
        "delivery_methods",
        json!({ "delivery_method_id": method.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Delivery method created",
        delivery_method_from_entity(method),
        Some(Meta::empty()),
    ))
}

fn delivery_method_from_entity(model: DeliveryMethodModel) -> DeliveryMethod {
    DeliveryMethod {
        id: model.id,
        name: model.name,
        description: model.description,
        base_cost: model.base_cost,
        free_threshold: model.free_threshold,
        estimated_days: model.estimated_days,
    }
}
