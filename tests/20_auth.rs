mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_then_login_and_read_profile() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };

    let email = common::unique_email("login");
    let (status, body) = ctx
        .post(
            "/api/auth/register",
            None,
            json!({
                "email": email,
                "password": "correct-horse",
                "firstName": "Lakshmi",
                "lastName": "Nair",
                "phone": "9876543210",
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"].get("password").is_none());

    let (status, body) = ctx
        .post("/api/auth/login", None, json!({ "email": email, "password": "correct-horse" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = ctx.get("/api/auth/profile", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["firstName"], "Lakshmi");
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };

    let payload = json!({
        "email": common::unique_email("dup"),
        "password": "pw-123456",
        "firstName": "A",
        "lastName": "B",
    });
    let (status, _) = ctx.post("/api/auth/register", None, payload.clone()).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.post("/api/auth/register", None, payload).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
    Ok(())
}

#[tokio::test]
async fn wrong_password_issues_no_token() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };

    let email = common::unique_email("wrongpw");
    ctx.post(
        "/api/auth/register",
        None,
        json!({ "email": email, "password": "right-one", "firstName": "A", "lastName": "B" }),
    )
    .await?;

    let (status, body) = ctx
        .post("/api/auth/login", None, json!({ "email": email, "password": "wrong-one" }))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());

    let (status, body) = ctx
        .post(
            "/api/auth/login",
            None,
            json!({ "email": common::unique_email("nobody"), "password": "x" }),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn tokens_do_not_cross_namespaces() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };

    let (customer, _) = ctx.register_customer().await?;
    let admin = ctx.admin_token().await?;

    let (status, _) = ctx.get("/api/auth/admin/profile", Some(&customer)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx.get("/api/cart", Some(&admin)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx.get("/api/auth/admin/profile", Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["role"], "admin");
    Ok(())
}

#[tokio::test]
async fn token_for_deleted_account_is_unauthenticated() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };

    let (token, id) = ctx.register_customer().await?;
    let pool = common::pool().await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id as i32)
        .execute(&pool)
        .await?;

    let (status, body) = ctx.get("/api/cart", Some(&token)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
    Ok(())
}
