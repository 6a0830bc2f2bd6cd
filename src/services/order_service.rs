use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::LockType;
use serde_json::json;

use crate::{
    audit,
    db::{DbConn, commit_or_rollback},
    dto::orders::{CreateOrderRequest, CreatedOrder, OrderList, OrderStatusChanged, OrderWithItems},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems, Model as CartModel},
        delivery_methods::Entity as DeliveryMethods,
        order_deliveries::{
            ActiveModel as DeliveryActive, Column as DeliveryCol, Entity as OrderDeliveries,
        },
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{DELIVERY_PENDING, Order, OrderDelivery, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{cart_service::get_cart_by_user_id, pricing},
    state::AppState,
};

/// Turns the user's cart into an order in a single transaction and returns the
/// new order id.
///
/// Prices are read from the catalog inside the transaction, the order header,
/// its line items and the optional delivery row are written, and the cart is
/// emptied. Any failure rolls all of it back, leaving the cart as it was.
#[tracing::instrument(skip(db, request), fields(order_id = tracing::field::Empty))]
pub async fn create_order_from_cart(
    db: &DbConn,
    user_id: i64,
    request: CreateOrderRequest,
) -> AppResult<i64> {
    // Cheap precondition on the pool before paying for a transaction.
    if get_cart_by_user_id(db, user_id).await?.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let txn = db.begin().await?;
    let outcome = assemble_order(&txn, user_id, &request).await;
    let order_id = commit_or_rollback(txn, outcome).await?;

    tracing::Span::current().record("order_id", order_id);
    Ok(order_id)
}

async fn assemble_order(
    txn: &DatabaseTransaction,
    user_id: i64,
    request: &CreateOrderRequest,
) -> AppResult<i64> {
    // Locking the cart rows serialises concurrent checkouts of the same cart:
    // the loser wakes up after the winner's delete and sees nothing.
    let cart = lock_cart(txn, user_id).await?;
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let snapshot = pricing::snapshot_prices(txn, &cart).await?;
    let now: DateTimeWithTimeZone = Utc::now().into();

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user_id),
        status: Set(OrderStatus::Created.as_str().to_string()),
        total_amount: Set(snapshot.total),
        comment: Set(non_blank(request.comment.as_deref())),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;

    let items = snapshot.lines.iter().map(|line| OrderItemActive {
        id: NotSet,
        order_id: Set(order.id),
        product_id: Set(line.product_id),
        quantity: Set(line.quantity),
        price_per_unit: Set(line.unit_price),
        total_price: Set(line.total_price),
    });
    OrderItems::insert_many(items)
        .exec_without_returning(txn)
        .await?;

    if let Some((delivery_method_id, address)) = delivery_target(request) {
        DeliveryActive {
            id: NotSet,
            order_id: Set(order.id),
            delivery_method_id: Set(delivery_method_id),
            address: Set(address),
            recipient_name: Set(non_blank(request.recipient_name.as_deref())),
            recipient_phone: Set(non_blank(request.recipient_phone.as_deref())),
            status: Set(DELIVERY_PENDING.to_string()),
            created_at: Set(now),
        }
        .insert(txn)
        .await?;
    }

    CartItems::delete_many()
        .filter(CartCol::UserId.eq(user_id))
        .exec(txn)
        .await?;

    tracing::info!(
        order_id = order.id,
        items = snapshot.lines.len(),
        total = snapshot.total,
        "order assembled"
    );
    Ok(order.id)
}

async fn lock_cart(txn: &DatabaseTransaction, user_id: i64) -> AppResult<Vec<CartModel>> {
    let cart = CartItems::find()
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::Id)
        .lock(LockType::Update)
        .all(txn)
        .await?;
    Ok(cart)
}

/// A delivery row needs both a method and a non-blank address; either one
/// alone means no delivery record at all.
fn delivery_target(request: &CreateOrderRequest) -> Option<(i64, String)> {
    let method_id = request.delivery_method_id?;
    let address = non_blank(request.address.as_deref())?;
    Some((method_id, address))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<CreatedOrder>> {
    let order_id = create_order_from_cart(&state.orm, user.user_id, payload).await?;

    audit::record(
        &state.orm,
        user.user_id,
        "order_create",
        "orders",
        json!({ "order_id": order_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        CreatedOrder { order_id },
        Some(Meta::empty()),
    ))
}

/// Order header plus its line items, or `None` if the order does not exist.
pub async fn get_order_with_items<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
) -> AppResult<Option<(Order, Vec<OrderItem>)>> {
    let Some(order) = Orders::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::Id)
        .find_also_related(Products)
        .all(db)
        .await?
        .into_iter()
        .map(|(item, product)| {
            let mut item = order_item_from_entity(item);
            item.product_name = product.map(|p| p.name);
            item
        })
        .collect();

    Ok(Some((order_from_entity(order), items)))
}

pub async fn get_order_delivery<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
) -> AppResult<Option<OrderDelivery>> {
    let row = OrderDeliveries::find()
        .filter(DeliveryCol::OrderId.eq(order_id))
        .find_also_related(DeliveryMethods)
        .one(db)
        .await?;

    Ok(match row {
        Some((delivery, Some(method))) => Some(OrderDelivery {
            address: delivery.address,
            recipient_name: delivery.recipient_name,
            recipient_phone: delivery.recipient_phone,
            status: delivery.status,
            method_name: method.name,
            base_cost: method.base_cost,
        }),
        _ => None,
    })
}

/// Header, items and delivery for one order, if it exists.
pub async fn load_order_details<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
) -> AppResult<Option<OrderWithItems>> {
    let Some((order, items)) = get_order_with_items(db, order_id).await? else {
        return Ok(None);
    };
    let delivery = get_order_delivery(db, order_id).await?;
    Ok(Some(OrderWithItems {
        order,
        items,
        delivery,
    }))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder
            .order_by_asc(OrderCol::CreatedAt)
            .order_by_asc(OrderCol::Id),
        SortOrder::Desc => finder
            .order_by_desc(OrderCol::CreatedAt)
            .order_by_desc(OrderCol::Id),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let details = match load_order_details(&state.orm, id).await? {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };
    if details.order.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::success("OK", details, Some(Meta::empty())))
}

/// Moves one of the caller's orders to `cancelled`. Only `created` and
/// `processing` orders can be cancelled.
pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<OrderStatusChanged>> {
    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    if order.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    if !OrderStatus::is_cancellable(&order.status) {
        return Err(AppError::BadRequest(
            "cannot cancel order in current status".into(),
        ));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(OrderStatus::Cancelled.as_str()))
        .col_expr(OrderCol::UpdatedAt, Expr::value(now))
        .filter(OrderCol::Id.eq(id))
        .filter(OrderCol::UserId.eq(user.user_id))
        .filter(OrderCol::Status.is_in(OrderStatus::CANCELLABLE.map(|s| s.as_str())))
        .exec(&state.orm)
        .await?;

    // The status changed between the read and the conditional update.
    if result.rows_affected == 0 {
        return Err(AppError::BadRequest(
            "cannot cancel order in current status".into(),
        ));
    }

    audit::record(
        &state.orm,
        user.user_id,
        "order_cancel",
        "orders",
        json!({ "order_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order cancelled successfully",
        OrderStatusChanged {
            order_id: id,
            status: OrderStatus::Cancelled.as_str().to_string(),
        },
        Some(Meta::empty()),
    ))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        status: model.status,
        total_amount: model.total_amount,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub(crate) fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price_per_unit: model.price_per_unit,
        total_price: model.total_price,
        product_name: None,
    }
}
