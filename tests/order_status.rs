mod common;

use storefront_api::{
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    error::AppError,
    middleware::auth::AuthUser,
    services::{admin_service, order_service},
    state::AppState,
};

use common::{add_to_cart, create_product, create_user, setup_state};

async fn place_order(state: &AppState, user: &AuthUser) -> anyhow::Result<i64> {
    let product = create_product(state, &format!("Item for {}", user.user_id), 700).await?;
    add_to_cart(state, user, product, 1).await?;
    let id = order_service::create_order_from_cart(&state.orm, user.user_id, CreateOrderRequest::default())
        .await?;
    Ok(id)
}

async fn set_status(state: &AppState, admin: &AuthUser, id: i64, status: &str) -> anyhow::Result<()> {
    admin_service::update_order_status(
        state,
        admin,
        id,
        UpdateOrderStatusRequest {
            status: status.into(),
        },
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn created_order_can_be_cancelled_once() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let order_id = place_order(&state, &user).await?;

    let resp = order_service::cancel_order(&state, &user, order_id).await?;
    let changed = resp.data.expect("status change");
    assert_eq!(changed.order_id, order_id);
    assert_eq!(changed.status, "cancelled");

    let err = order_service::cancel_order(&state, &user, order_id)
        .await
        .expect_err("already cancelled");
    assert!(matches!(err, AppError::BadRequest(_)));

    let details = order_service::get_order(&state, &user, order_id).await?.data.expect("order");
    assert_eq!(details.order.status, "cancelled");
    Ok(())
}

#[tokio::test]
async fn processing_order_is_cancellable_but_shipped_is_not() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;

    let processing = place_order(&state, &user).await?;
    set_status(&state, &admin, processing, "processing").await?;
    order_service::cancel_order(&state, &user, processing).await?;

    let shipped = place_order(&state, &user).await?;
    set_status(&state, &admin, shipped, "shipped").await?;
    let err = order_service::cancel_order(&state, &user, shipped)
        .await
        .expect_err("shipped orders stay shipped");
    assert!(matches!(err, AppError::BadRequest(_)));

    let details = order_service::get_order(&state, &user, shipped).await?.data.expect("order");
    assert_eq!(details.order.status, "shipped");
    Ok(())
}

#[tokio::test]
async fn orders_of_other_users_are_forbidden() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_user(&state, "user", "owner@example.com").await?;
    let intruder = create_user(&state, "user", "intruder@example.com").await?;
    let order_id = place_order(&state, &owner).await?;

    let err = order_service::get_order(&state, &intruder, order_id)
        .await
        .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));

    let err = order_service::cancel_order(&state, &intruder, order_id)
        .await
        .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));

    let err = order_service::get_order(&state, &owner, order_id + 100)
        .await
        .expect_err("missing order");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn status_updates_are_admin_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;
    let order_id = place_order(&state, &user).await?;

    let err = set_status(&state, &user, order_id, "processing")
        .await
        .expect_err("users cannot change status");
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Forbidden)));

    let err = set_status(&state, &admin, order_id, "   ")
        .await
        .expect_err("blank status");
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));

    let err = set_status(&state, &admin, order_id + 100, "processing")
        .await
        .expect_err("missing order");
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn admin_sees_every_order_with_details() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let alice = create_user(&state, "user", "alice@example.com").await?;
    let bob = create_user(&state, "user", "bob@example.com").await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;
    let first = place_order(&state, &alice).await?;
    let second = place_order(&state, &bob).await?;

    let resp = admin_service::list_all_orders(&state, &admin, Default::default()).await?;
    let list = resp.data.expect("orders");
    let ids: Vec<i64> = list.items.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(list.items.iter().all(|o| o.items.len() == 1));

    let detail = admin_service::get_order_admin(&state, &admin, first).await?.data.expect("order");
    assert_eq!(detail.order.user_id, alice.user_id);

    let err = admin_service::list_all_orders(&state, &alice, Default::default())
        .await
        .expect_err("admin only");
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}
