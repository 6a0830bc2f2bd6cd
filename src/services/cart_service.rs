use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::json;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartCleared, CartLine, CartView},
    entity::{
        cart_items::{ActiveModel as CartActive, Column as CartCol, Entity as CartItems, Model as CartModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartItem,
    response::{ApiResponse, Meta},
    services::pricing,
    state::AppState,
};

/// Current cart rows of `user_id`, oldest first. Works on the pool or inside a
/// transaction.
pub async fn get_cart_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
) -> AppResult<Vec<CartModel>> {
    let items = CartItems::find()
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::Id)
        .all(db)
        .await?;
    Ok(items)
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let rows = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    let mut total: i64 = 0;
    for (cart_item, product) in rows {
        // Cart rows cascade with their product, so a missing product is only a
        // transient read between the two deletes.
        let Some(product) = product else { continue };
        let line_total = pricing::line_total(product.price, cart_item.quantity)?;
        total = total
            .checked_add(line_total)
            .ok_or_else(|| AppError::BadRequest("cart total is too large".into()))?;
        items.push(CartLine {
            id: cart_item.id,
            product_id: product.id,
            product_name: product.name,
            unit_price: product.price,
            quantity: cart_item.quantity,
            line_total,
        });
    }

    let meta = Meta::new(1, items.len() as i64, items.len() as i64);
    Ok(ApiResponse::success("OK", CartView { items, total }, Some(meta)))
}

/// Adds `quantity` of a product, incrementing the existing row if the product
/// is already in the cart.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    upsert_cart_item(state, user, payload, QuantityMode::Increment).await
}

/// Sets the quantity of a product in the cart, inserting the row if needed.
pub async fn set_cart_quantity(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    upsert_cart_item(state, user, payload, QuantityMode::Replace).await
}

#[derive(Debug, Clone, Copy)]
enum QuantityMode {
    Increment,
    Replace,
}

async fn upsert_cart_item(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
    mode: QuantityMode,
) -> AppResult<ApiResponse<CartItem>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product_exist = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?;
    if product_exist.is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    if let QuantityMode::Increment = mode {
        let existing = CartItems::find()
            .filter(CartCol::UserId.eq(user.user_id))
            .filter(CartCol::ProductId.eq(payload.product_id))
            .one(&state.orm)
            .await?;
        if let Some(existing) = existing {
            ensure_quantity_fits(existing.quantity, payload.quantity)?;
        }
    }

    let mut on_conflict = OnConflict::columns([CartCol::UserId, CartCol::ProductId]);
    match mode {
        QuantityMode::Increment => on_conflict.value(
            CartCol::Quantity,
            Expr::cust("cart_items.quantity + excluded.quantity"),
        ),
        QuantityMode::Replace => on_conflict.update_column(CartCol::Quantity),
    };

    CartItems::insert(CartActive {
        id: NotSet,
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        quantity: Set(payload.quantity),
        created_at: Set(Utc::now().into()),
    })
    .on_conflict(on_conflict)
    .exec_without_returning(&state.orm)
    .await?;

    let cart_item = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .filter(CartCol::ProductId.eq(payload.product_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    audit::record(
        &state.orm,
        user.user_id,
        "cart_update",
        "cart_items",
        json!({ "product_id": payload.product_id, "quantity": cart_item.quantity }),
    )
    .await;

    Ok(ApiResponse::success("OK", cart_item_from_entity(cart_item), None))
}

/// Incrementing past `i32::MAX` would be rejected by the store as a server
/// error, so it is refused up front as a client mistake.
fn ensure_quantity_fits(current: i32, added: i32) -> AppResult<i32> {
    current
        .checked_add(added)
        .ok_or_else(|| AppError::BadRequest("quantity is too large".to_string()))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: i64,
) -> AppResult<ApiResponse<CartCleared>> {
    let result = CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .filter(CartCol::ProductId.eq(product_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user.user_id,
        "cart_remove",
        "cart_items",
        json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        CartCleared {
            removed: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartCleared>> {
    let result = CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Cart cleared",
        CartCleared {
            removed: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}

pub(crate) fn cart_item_from_entity(model: CartModel) -> CartItem {
    CartItem {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
