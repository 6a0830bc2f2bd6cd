mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use storefront_api::{build_app, middleware::auth::AuthUser, services::auth_service::issue_token};
use tower::ServiceExt;

use common::{
    JWT_SECRET, add_to_cart, create_category, create_characteristic_type, create_product, create_user,
    setup_state,
};

fn bearer(user: &AuthUser) -> String {
    let token = issue_token(user.user_id, &user.role, JWT_SECRET, 1).expect("token");
    format!("Bearer {token}")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_order(auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post("/api/orders").header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_reports_database_up() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = build_app(state);

    let (status, body) = send(&app, Request::get("/health").body(Body::empty())?).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
    Ok(())
}

#[tokio::test]
async fn create_order_over_http() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    let app = build_app(state.clone());
    let auth = bearer(&user);

    let (status, body) = send(&app, post_order(Some(&auth), json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Cart is empty");

    add_to_cart(&state, &user, widget, 2).await?;
    let (status, body) = send(
        &app,
        post_order(Some(&auth), json!({ "comment": "gift wrap" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["data"]["order_id"].as_i64().expect("order id");

    let (status, body) = send(&app, get(&format!("/api/orders/{order_id}"), &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["total_amount"], 2000);
    assert_eq!(body["data"]["order"]["comment"], "gift wrap");
    assert_eq!(body["data"]["items"][0]["price_per_unit"], 1000);
    Ok(())
}

#[tokio::test]
async fn authorization_failures_map_to_status_codes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_user(&state, "user", "owner@example.com").await?;
    let intruder = create_user(&state, "user", "intruder@example.com").await?;
    let widget = create_product(&state, "Widget", 1000).await?;
    let app = build_app(state.clone());

    let (status, _) = send(&app, post_order(None, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_order(Some("Bearer not-a-token"), json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    add_to_cart(&state, &owner, widget, 1).await?;
    let (_, body) = send(&app, post_order(Some(&bearer(&owner)), json!({}))).await;
    let order_id = body["data"]["order_id"].as_i64().expect("order id");

    let (status, _) = send(&app, get(&format!("/api/orders/{order_id}"), &bearer(&intruder))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get("/api/admin/orders", &bearer(&owner))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get("/api/orders/999", &bearer(&owner))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_route_returns_not_found_envelope() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = build_app(state);

    let (status, body) = send(&app, Request::get("/nope").body(Body::empty())?).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nope");
    Ok(())
}

#[tokio::test]
async fn catalog_and_profile_routes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;
    let user = create_user(&state, "user", "user@example.com").await?;
    create_category(&state, "Mugs").await?;
    let color = create_characteristic_type(&state, "Color", None).await?;
    let mug = create_product(&state, "Mug", 800).await?;
    let app = build_app(state);

    let (status, body) = send(&app, Request::get("/api/categories").body(Body::empty())?).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Mugs");

    let (status, _) = send(&app, Request::get("/api/products/999/details").body(Body::empty())?).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let replace = Request::put(format!("/api/admin/products/{mug}/characteristics"))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, bearer(&admin))
        .body(Body::from(
            json!({ "items": [{ "characteristic_type_id": color, "value": "White" }] }).to_string(),
        ))?;
    let (status, _) = send(&app, replace).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Request::get(format!("/api/products/{mug}/details")).body(Body::empty())?,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product"]["name"], "Mug");
    assert_eq!(body["data"]["characteristics"][0]["characteristic_name"], "Color");
    assert_eq!(body["data"]["characteristics"][0]["value"], "White");

    let update = Request::put("/api/auth/me")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, bearer(&user))
        .body(Body::from(json!({ "first_name": "Grace" }).to_string()))?;
    let (status, _) = send(&app, update).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/auth/me", &bearer(&user))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "user@example.com");
    assert_eq!(body["data"]["first_name"], "Grace");
    Ok(())
}
