mod common;

use sea_orm::{EntityTrait, PaginatorTrait};
use storefront_api::{
    dto::{orders::CreateOrderRequest, products::UpdateProductRequest},
    entity::{CartItems, OrderDeliveries, OrderItems, Orders},
    error::AppError,
    routes::params::OrderListQuery,
    services::{cart_service, order_service, product_service},
};

use common::{add_to_cart, create_delivery_method, create_product, create_user, setup_state};

#[tokio::test]
async fn order_captures_cart_at_current_prices_and_empties_it() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    let gadget = create_product(&state, "Gadget", 500).await?;
    add_to_cart(&state, &user, widget, 2).await?;
    add_to_cart(&state, &user, gadget, 1).await?;

    let order_id = order_service::create_order_from_cart(
        &state.orm,
        user.user_id,
        CreateOrderRequest {
            comment: Some("ring twice".into()),
            ..Default::default()
        },
    )
    .await?;

    let details = order_service::load_order_details(&state.orm, order_id)
        .await?
        .expect("order exists");
    assert_eq!(details.order.user_id, user.user_id);
    assert_eq!(details.order.status, "created");
    assert_eq!(details.order.total_amount, 2500);
    assert_eq!(details.order.comment.as_deref(), Some("ring twice"));
    assert!(details.delivery.is_none());

    assert_eq!(details.items.len(), 2);
    let widget_line = details.items.iter().find(|i| i.product_id == widget).expect("widget line");
    assert_eq!(widget_line.quantity, 2);
    assert_eq!(widget_line.price_per_unit, 1000);
    assert_eq!(widget_line.total_price, 2000);
    assert_eq!(widget_line.product_name.as_deref(), Some("Widget"));
    let gadget_line = details.items.iter().find(|i| i.product_id == gadget).expect("gadget line");
    assert_eq!(gadget_line.total_price, 500);

    let items_sum: i64 = details.items.iter().map(|i| i.total_price).sum();
    assert_eq!(items_sum, details.order.total_amount);

    let cart = cart_service::get_cart_by_user_id(&state.orm, user.user_id).await?;
    assert!(cart.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected_without_writing_anything() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;

    let err = order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default())
        .await
        .expect_err("empty cart must fail");
    assert!(matches!(err, AppError::EmptyCart));
    assert_eq!(err.to_string(), "Cart is empty");
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn failure_after_header_insert_rolls_back_the_whole_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    add_to_cart(&state, &user, widget, 3).await?;

    // The delivery insert runs after the header and items; an unknown method
    // violates its foreign key.
    let err = order_service::create_order_from_cart(
        &state.orm,
        user.user_id,
        CreateOrderRequest {
            delivery_method_id: Some(9999),
            address: Some("1 Main St".into()),
            ..Default::default()
        },
    )
    .await
    .expect_err("foreign key violation must fail the order");
    assert!(matches!(err, AppError::OrmError(_)));
    assert!(err.to_string().starts_with("internal server error: "));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    assert_eq!(OrderDeliveries::find().count(&state.orm).await?, 0);

    let cart = cart_service::get_cart_by_user_id(&state.orm, user.user_id).await?;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 3);
    Ok(())
}

#[tokio::test]
async fn placed_order_keeps_its_prices_after_catalog_change() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    add_to_cart(&state, &user, widget, 2).await?;

    let order_id =
        order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()).await?;

    product_service::update_product(
        &state,
        &admin,
        widget,
        UpdateProductRequest {
            price: Some(4000),
            ..Default::default()
        },
    )
    .await?;

    let resp = order_service::get_order(&state, &user, order_id).await?;
    let details = resp.data.expect("order data");
    assert_eq!(details.order.total_amount, 2000);
    assert_eq!(details.items[0].price_per_unit, 1000);
    assert_eq!(details.items[0].total_price, 2000);
    Ok(())
}

#[tokio::test]
async fn delivery_row_needs_both_method_and_address() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    let courier = create_delivery_method(&state, "Courier", 300).await?;

    add_to_cart(&state, &user, widget, 1).await?;
    let with_delivery = order_service::create_order_from_cart(
        &state.orm,
        user.user_id,
        CreateOrderRequest {
            delivery_method_id: Some(courier),
            address: Some("  1 Main St ".into()),
            recipient_name: Some("Ann".into()),
            recipient_phone: Some(" ".into()),
            comment: None,
        },
    )
    .await?;

    add_to_cart(&state, &user, widget, 1).await?;
    let blank_address = order_service::create_order_from_cart(
        &state.orm,
        user.user_id,
        CreateOrderRequest {
            delivery_method_id: Some(courier),
            address: Some("   ".into()),
            ..Default::default()
        },
    )
    .await?;

    let delivery = order_service::get_order_delivery(&state.orm, with_delivery)
        .await?
        .expect("delivery row");
    assert_eq!(delivery.address, "1 Main St");
    assert_eq!(delivery.method_name, "Courier");
    assert_eq!(delivery.base_cost, 300);
    assert_eq!(delivery.status, "pending");
    assert_eq!(delivery.recipient_name.as_deref(), Some("Ann"));
    assert_eq!(delivery.recipient_phone, None);

    assert!(order_service::get_order_delivery(&state.orm, blank_address).await?.is_none());
    assert_eq!(OrderDeliveries::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn consumed_cart_cannot_be_ordered_twice() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    add_to_cart(&state, &user, widget, 1).await?;

    order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()).await?;
    let err = order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default())
        .await
        .expect_err("second checkout must fail");
    assert!(matches!(err, AppError::EmptyCart));
    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn concurrent_checkouts_of_one_cart_produce_one_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    add_to_cart(&state, &user, widget, 2).await?;

    let (first, second) = tokio::join!(
        order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()),
        order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, AppError::EmptyCart))
    );
    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 1);
    assert_eq!(CartItems::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn order_list_is_newest_first_and_scoped_to_the_caller() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let other = create_user(&state, "user", "other@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;

    add_to_cart(&state, &user, widget, 1).await?;
    let older = order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()).await?;
    add_to_cart(&state, &user, widget, 2).await?;
    let newer = order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()).await?;
    add_to_cart(&state, &other, widget, 1).await?;
    order_service::create_order_from_cart(&state.orm, other.user_id, CreateOrderRequest::default()).await?;

    let resp = order_service::list_orders(&state, &user, Default::default()).await?;
    let ids: Vec<i64> = resp.data.expect("orders").items.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(resp.meta.and_then(|m| m.total), Some(2));
    Ok(())
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    add_to_cart(&state, &user, widget, 1).await?;
    order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default()).await?;

    let resp = order_service::list_orders(
        &state,
        &user,
        OrderListQuery {
            page: Some(i64::MAX),
            ..Default::default()
        },
    )
    .await?;
    assert!(resp.data.expect("orders").items.is_empty());
    assert_eq!(resp.meta.and_then(|m| m.total), Some(1));
    Ok(())
}
