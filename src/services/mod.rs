pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod characteristic_service;
pub mod delivery_service;
pub mod order_service;
pub mod pricing;
pub mod product_service;
