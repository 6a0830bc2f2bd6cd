use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
        cart::{AddToCartRequest, CartCleared, CartLine, CartView},
        categories::{CategoryList, CreateCategoryRequest},
        delivery::{CreateDeliveryMethodRequest, DeliveryMethodList},
        orders::{
            CreateOrderRequest, CreatedOrder, OrderDetailList, OrderList, OrderStatusChanged,
            OrderWithItems, UpdateOrderStatusRequest,
        },
        products::{
            CharacteristicTypeList, CharacteristicValue, CreateCharacteristicTypeRequest,
            CreateProductRequest, ProductDetails, ProductList, ReplaceCharacteristicsRequest,
            UpdateProductRequest,
        },
    },
    models::{
        CartItem, Category, CharacteristicType, DeliveryMethod, Order, OrderDelivery, OrderItem,
        Product, ProductCharacteristic, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, categories, delivery_methods, health, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        auth::update_me,
        cart::cart_list,
        cart::add_to_cart,
        cart::set_cart_item,
        cart::clear_cart,
        cart::remove_from_cart,
        products::list_products,
        products::get_product,
        products::get_product_details,
        categories::list_categories,
        delivery_methods::list_delivery_methods,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::cancel_order,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::create_product,
        admin::update_product,
        admin::create_delivery_method,
        admin::replace_product_characteristics,
        admin::create_category,
        admin::list_characteristic_types,
        admin::create_characteristic_type
    ),
    components(
        schemas(
            User,
            Product,
            Category,
            CharacteristicType,
            ProductCharacteristic,
            UpdateProfileRequest,
            CategoryList,
            CreateCategoryRequest,
            CharacteristicTypeList,
            CharacteristicValue,
            CreateCharacteristicTypeRequest,
            ProductDetails,
            ReplaceCharacteristicsRequest,
            DeliveryMethod,
            CartItem,
            Order,
            OrderItem,
            OrderDelivery,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            CartLine,
            CartView,
            CartCleared,
            CreateDeliveryMethodRequest,
            DeliveryMethodList,
            CreateOrderRequest,
            CreatedOrder,
            OrderWithItems,
            OrderList,
            OrderDetailList,
            OrderStatusChanged,
            UpdateOrderStatusRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            health::HealthData,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CreatedOrder>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetailList>,
            ApiResponse<CartView>,
            ApiResponse<ProductDetails>,
            ApiResponse<CategoryList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Delivery", description = "Delivery method endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
