use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderDelivery, OrderItem};

/// Body of `POST /orders`. Every field is optional; a delivery record is only
/// written when both `delivery_method_id` and a non-blank `address` are given.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub delivery_method_id: Option<i64>,
    pub address: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    pub order_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<OrderDelivery>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailList {
    pub items: Vec<OrderWithItems>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderStatusChanged {
    pub order_id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}
