use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        categories::CreateCategoryRequest,
        delivery::CreateDeliveryMethodRequest,
        orders::{OrderDetailList, OrderWithItems, UpdateOrderStatusRequest},
        products::{
            CharacteristicTypeList, CreateCharacteristicTypeRequest, CreateProductRequest,
            ProductDetails, ReplaceCharacteristicsRequest, UpdateProductRequest,
        },
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Category, CharacteristicType, DeliveryMethod, Order, Product},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{
        admin_service, category_service, characteristic_service, delivery_service,
        product_service,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}", get(get_order_admin))
        .route("/orders/{id}/status", put(update_order_status))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product))
        .route(
            "/products/{id}/characteristics",
            put(replace_product_characteristics),
        )
        .route("/delivery_methods", post(create_delivery_method))
        .route("/categories", post(create_category))
        .route(
            "/characteristic_types",
            get(list_characteristic_types).post(create_characteristic_type),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
    (status = 200, description = "All orders with items and delivery (admin only)", body = ApiResponse<OrderDetailList>),
    (status = 403, description = "Forbidden"),
    (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderDetailList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail (admin only)", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::get_order_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<Order>),
        (status = 400, description = "Status is required"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok(resp.created())
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/delivery_methods",
    request_body = CreateDeliveryMethodRequest,
    responses(
        (status = 201, description = "Create delivery method", body = ApiResponse<DeliveryMethod>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_delivery_method(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateDeliveryMethodRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DeliveryMethod>>)> {
    let resp = delivery_service::create_delivery_method(&state, &user, payload).await?;
    Ok(resp.created())
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}/characteristics",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ReplaceCharacteristicsRequest,
    responses(
        (status = 200, description = "Characteristics replaced", body = ApiResponse<ProductDetails>),
        (status = 400, description = "Unknown type, duplicate type or blank value"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn replace_product_characteristics(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReplaceCharacteristicsRequest>,
) -> AppResult<Json<ApiResponse<ProductDetails>>> {
    let resp =
        characteristic_service::replace_product_characteristics(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Missing name or unknown parent"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let resp = category_service::create_category(&state, &user, payload).await?;
    Ok(resp.created())
}

#[utoipa::path(
    get,
    path = "/api/admin/characteristic_types",
    responses(
        (status = 200, description = "All characteristic types", body = ApiResponse<CharacteristicTypeList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_characteristic_types(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CharacteristicTypeList>>> {
    let resp = characteristic_service::list_characteristic_types(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/characteristic_types",
    request_body = CreateCharacteristicTypeRequest,
    responses(
        (status = 201, description = "Create characteristic type", body = ApiResponse<CharacteristicType>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_characteristic_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCharacteristicTypeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CharacteristicType>>)> {
    let resp = characteristic_service::create_characteristic_type(&state, &user, payload).await?;
    Ok(resp.created())
}
