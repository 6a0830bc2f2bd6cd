use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, CharacteristicType, Product, ProductCharacteristic};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<i64>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

/// A product with its category and characteristics.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetails {
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub characteristics: Vec<ProductCharacteristic>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCharacteristicTypeRequest {
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CharacteristicValue {
    pub characteristic_type_id: i64,
    pub value: String,
}

/// Full replacement set for a product's characteristics.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceCharacteristicsRequest {
    pub items: Vec<CharacteristicValue>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CharacteristicTypeList {
    #[schema(value_type = Vec<CharacteristicType>)]
    pub items: Vec<CharacteristicType>,
}
