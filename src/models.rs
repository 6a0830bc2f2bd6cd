use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: i64,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryMethod {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_cost: i64,
    pub free_threshold: Option<i64>,
    pub estimated_days: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub total_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price_per_unit: i64,
    pub total_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDelivery {
    pub address: String,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub status: String,
    pub method_name: String,
    pub base_cost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacteristicType {
    pub id: i64,
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Option<i64>,
}

/// One characteristic of a product, named by its type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCharacteristic {
    pub id: i64,
    pub characteristic_type_id: i64,
    pub characteristic_name: String,
    pub characteristic_unit: Option<String>,
    pub value: String,
}

/// Statuses the order workflow itself assigns. Admin tooling may store any
/// other string; those are carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Created,
    Processing,
    Cancelled,
}

impl OrderStatus {
    pub const CANCELLABLE: [OrderStatus; 2] = [OrderStatus::Created, OrderStatus::Processing];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Processing => "processing",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_cancellable(status: &str) -> bool {
        Self::CANCELLABLE.iter().any(|s| s.as_str() == status)
    }
}

pub const DELIVERY_PENDING: &str = "pending";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_created_and_processing_are_cancellable() {
        assert!(OrderStatus::is_cancellable("created"));
        assert!(OrderStatus::is_cancellable("processing"));
        assert!(!OrderStatus::is_cancellable("cancelled"));
        assert!(!OrderStatus::is_cancellable("shipped"));
        assert!(!OrderStatus::is_cancellable(""));
    }
}
