mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn customer_token_cannot_create_products() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let (customer, _) = ctx.register_customer().await?;
    let admin = ctx.admin_token().await?;

    let name = format!("Forbidden Paithani {}", uuid::Uuid::new_v4().simple());
    let (status, _) = ctx
        .post(
            "/api/admin/products",
            Some(&customer),
            json!({ "name": name, "price": 100, "stockQuantity": 1 }),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let search = format!("/api/admin/products?search={}", name.replace(' ', "%20"));
    let (_, body) = ctx.get(&search, Some(&admin)).await?;
    assert_eq!(body["pagination"]["totalProducts"], 0);
    Ok(())
}

#[tokio::test]
async fn product_validation_and_update() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;

    let (status, body) = ctx
        .post("/api/admin/products", Some(&admin), json!({ "name": "Chanderi", "price": -5 }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Price cannot be negative");

    let (status, _) = ctx
        .post("/api/admin/products", Some(&admin), json!({ "price": 500 }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = ctx.create_product(&admin, 3).await?;
    let (status, body) = ctx
        .put(
            &format!("/api/admin/products/{}", id),
            Some(&admin),
            json!({ "name": "Chanderi Cotton", "price": 2499.5, "category": "Cotton" }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "Chanderi Cotton");
    assert_eq!(body["product"]["stock_quantity"], 3);
    assert_eq!(body["product"]["is_active"], true);

    let (status, _) = ctx
        .put(
            &format!("/api/admin/products/{}", i32::MAX),
            Some(&admin),
            json!({ "name": "Ghost", "price": 1 }),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn toggle_hides_product_from_catalog() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;
    let id = ctx.create_product(&admin, 4).await?;
    let path = format!("/api/admin/products/{}/toggle-status", id);

    let (status, _) = ctx.get(&format!("/api/products/{}", id), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ctx.put(&path, Some(&admin), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["is_active"], false);

    let (status, body) = ctx.get(&format!("/api/products/{}", id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (_, body) = ctx.put(&path, Some(&admin), json!({})).await?;
    assert_eq!(body["product"]["is_active"], true);

    let (status, _) = ctx
        .put(&format!("/api/admin/products/{}/toggle-status", i32::MAX), Some(&admin), json!({}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_removes_every_cart_line_first() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;
    let product = ctx.create_product(&admin, 10).await?;

    let mut shoppers = Vec::new();
    for _ in 0..3 {
        let (token, _) = ctx.register_customer().await?;
        let (status, _) = ctx
            .post("/api/cart/add", Some(&token), json!({ "productId": product, "quantity": 1 }))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
        shoppers.push(token);
    }

    let (status, body) = ctx.delete(&format!("/api/admin/products/{}", product), Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let pool = common::pool().await?;
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart WHERE product_id = $1")
        .bind(product as i32)
        .fetch_one(&pool)
        .await?;
    assert_eq!(orphans, 0);

    for token in &shoppers {
        let (_, body) = ctx.get("/api/cart/count", Some(token)).await?;
        assert_eq!(body["count"], 0);
    }

    let (status, _) = ctx.delete(&format!("/api/admin/products/{}", product), Some(&admin)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn order_status_updates_are_validated() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;
    let (_, user_id) = ctx.register_customer().await?;

    let pool = common::pool().await?;
    let order_id: i32 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, total_amount, shipping_address) VALUES ($1, 4200, '12 MG Road') RETURNING id",
    )
    .bind(user_id as i32)
    .fetch_one(&pool)
    .await?;
    let path = format!("/api/admin/orders/{}/status", order_id);

    let (status, _) = ctx.put(&path, Some(&admin), json!({ "status": "teleported" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx.put(&path, Some(&admin), json!({ "status": "shipped" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "shipped");

    let (_, body) = ctx.get("/api/admin/orders?status=shipped&limit=100", Some(&admin)).await?;
    let orders = body["orders"].as_array().unwrap();
    assert!(orders.iter().any(|o| o["id"] == order_id));
    assert!(orders.iter().all(|o| o["status"] == "shipped"));

    let (status, _) = ctx
        .put(&format!("/api/admin/orders/{}/status", i32::MAX), Some(&admin), json!({ "status": "pending" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn dashboard_reports_snapshot() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;
    ctx.create_product(&admin, 1).await?;

    let (status, body) = ctx.get("/api/admin/dashboard", Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["stats"];
    assert!(stats["totalProducts"].as_i64().unwrap() >= 1);
    assert!(stats["activeProducts"].as_i64().unwrap() <= stats["totalProducts"].as_i64().unwrap());
    assert!(body["ordersByStatus"].is_array());
    assert!(body["recentOrders"].as_array().unwrap().len() <= 10);
    Ok(())
}

#[tokio::test]
async fn catalog_pagination_is_clamped() -> Result<()> {
    let Some(ctx) = common::context().await? else {
        return Ok(());
    };
    let admin = ctx.admin_token().await?;
    ctx.create_product(&admin, 2).await?;

    let (status, body) = ctx.get("/api/products?page=0&limit=1000", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert!(body["products"].as_array().unwrap().len() <= 100);

    let (status, body) = ctx.get("/api/products/new-arrivals", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["products"].as_array().unwrap().len() <= 4);

    let (status, body) = ctx.get("/api/products/celebrate?priceFilter=20k", None).await?;
    assert_eq!(status, StatusCode::OK);
    for product in body["products"].as_array().unwrap() {
        assert!(product["price"].as_f64().unwrap() <= 20_000.0);
    }

    let (status, body) = ctx.get("/api/products/categories/list", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["categories"].as_array().unwrap().iter().any(|c| c == "Silk"));
    Ok(())
}
