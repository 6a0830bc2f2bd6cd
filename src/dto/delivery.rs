use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::DeliveryMethod;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeliveryMethodRequest {
    pub name: String,
    pub description: Option<String>,
    pub base_cost: i64,
    pub free_threshold: Option<i64>,
    pub estimated_days: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct DeliveryMethodList {
    #[schema(value_type = Vec<DeliveryMethod>)]
    pub items: Vec<DeliveryMethod>,
}
