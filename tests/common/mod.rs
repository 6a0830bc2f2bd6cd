#![allow(dead_code)]

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use storefront_api::{
    config::AppConfig,
    db::create_orm_conn,
    dto::cart::AddToCartRequest,
    entity::{categories, characteristic_types, delivery_methods, products, users},
    middleware::auth::AuthUser,
    services::cart_service,
    state::AppState,
};

pub const JWT_SECRET: &str = "test-secret";

// SQLite rendition of the files in migrations/, which stay the source of truth.
// tests/schema.rs fails when the table or column sets drift apart.
const SCHEMA: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    created_at TEXT NOT NULL,
    first_name TEXT,
    last_name TEXT,
    phone TEXT
);
CREATE TABLE categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    slug TEXT UNIQUE,
    parent_id BIGINT REFERENCES categories(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    price BIGINT NOT NULL CHECK (price >= 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    category_id BIGINT REFERENCES categories(id) ON DELETE SET NULL
);
CREATE TABLE characteristic_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    unit TEXT,
    category_id BIGINT REFERENCES categories(id) ON DELETE SET NULL
);
CREATE TABLE product_characteristics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id BIGINT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    characteristic_type_id BIGINT NOT NULL REFERENCES characteristic_types(id) ON DELETE CASCADE,
    value TEXT NOT NULL,
    UNIQUE (product_id, characteristic_type_id)
);
CREATE TABLE delivery_methods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    base_cost BIGINT NOT NULL DEFAULT 0,
    free_threshold BIGINT,
    estimated_days INTEGER,
    created_at TEXT NOT NULL
);
CREATE TABLE cart_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    product_id BIGINT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    created_at TEXT NOT NULL,
    UNIQUE (user_id, product_id)
);
CREATE TABLE orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id BIGINT NOT NULL REFERENCES users(id),
    status TEXT NOT NULL,
    total_amount BIGINT NOT NULL,
    comment TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id BIGINT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id BIGINT NOT NULL REFERENCES products(id),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    price_per_unit BIGINT NOT NULL,
    total_price BIGINT NOT NULL
);
CREATE TABLE order_deliveries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id BIGINT NOT NULL UNIQUE REFERENCES orders(id) ON DELETE CASCADE,
    delivery_method_id BIGINT NOT NULL REFERENCES delivery_methods(id),
    address TEXT NOT NULL,
    recipient_name TEXT,
    recipient_phone TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL
);
CREATE TABLE audit_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id BIGINT,
    action TEXT NOT NULL,
    resource TEXT,
    metadata TEXT,
    created_at TEXT NOT NULL
)
"#;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_hours: 1,
        db_max_connections: 1,
        request_timeout_secs: 5,
        frontend_origins: Vec::new(),
    }
}

/// Fresh in-memory database per test. A single connection keeps every query
/// on the same in-memory schema.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = test_config();
    let orm = create_orm_conn(&config.database_url, 1).await?;
    for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        orm.execute_unprepared(stmt).await?;
    }
    Ok(AppState::new(orm, config))
}

pub async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<AuthUser> {
    let user = users::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".into()),
        role: Set(role.to_string()),
        first_name: Set(None),
        last_name: Set(None),
        phone: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_product(state: &AppState, name: &str, price: i64) -> anyhow::Result<i64> {
    let now = Utc::now();
    let product = products::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(None),
        price: Set(price),
        category_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product.id)
}

pub async fn create_category(state: &AppState, name: &str) -> anyhow::Result<i64> {
    let category = categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(None),
        slug: Set(None),
        parent_id: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(category.id)
}

pub async fn create_characteristic_type(
    state: &AppState,
    name: &str,
    unit: Option<&str>,
) -> anyhow::Result<i64> {
    let kind = characteristic_types::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        unit: Set(unit.map(str::to_string)),
        category_id: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(kind.id)
}

pub async fn create_delivery_method(state: &AppState, name: &str, base_cost: i64) -> anyhow::Result<i64> {
    let method = delivery_methods::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(None),
        base_cost: Set(base_cost),
        free_threshold: Set(None),
        estimated_days: Set(Some(2)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(method.id)
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: i64,
    quantity: i32,
) -> anyhow::Result<()> {
    cart_service::add_to_cart(state, user, AddToCartRequest { product_id, quantity }).await?;
    Ok(())
}
