#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use saree_storefront_api::auth::hash_password;
use saree_storefront_api::config::DatabaseConfig;
use saree_storefront_api::database::{AdminRepository, DatabaseManager};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // DATABASE_URL is inherited; the secret is pinned so tests can mint tokens
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_saree-storefront-api"));
        cmd.env("PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/api/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Everything a test needs to talk to a live server
pub struct TestContext {
    pub server: &'static TestServer,
    pub client: reqwest::Client,
}

/// Start (once per test binary) and return the server, or `None` when no
/// database is configured, in which case the calling test should return early.
pub async fn context() -> Result<Option<TestContext>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(20)).await?;

    Ok(Some(TestContext {
        server,
        client: reqwest::Client::new(),
    }))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

/// Direct pool for seeding rows the API cannot create (admins, orders)
pub async fn pool() -> Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(pool)
}

impl TestContext {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read(request.send().await?).await
    }

    pub async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        read(request.send().await?).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(reqwest::Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(reqwest::Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(reqwest::Method::DELETE, path, token, None).await
    }

    /// Register a fresh customer; returns (token, user id)
    pub async fn register_customer(&self) -> Result<(String, i64)> {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "email": unique_email("shopper"),
                    "password": "handloom-123",
                    "firstName": "Meera",
                    "lastName": "Iyer",
                }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);

        let token = body["token"].as_str().context("missing token")?.to_string();
        let id = body["user"]["id"].as_i64().context("missing user id")?;
        Ok((token, id))
    }

    /// Seed a fresh admin directly and log in through the API
    pub async fn admin_token(&self) -> Result<String> {
        let email = unique_email("admin");
        let password = "weaver-admin-pw";

        let pool = pool().await?;
        AdminRepository::new(&pool)
            .create(&email, &hash_password(password)?, "Store Owner", "admin")
            .await?;
        pool.close().await;

        let (status, body) = self
            .post("/api/auth/admin/login", None, json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "admin login failed: {} {}", status, body);
        Ok(body["token"].as_str().context("missing token")?.to_string())
    }

    /// Create an active product with the given stock; returns its id
    pub async fn create_product(&self, admin_token: &str, stock: i32) -> Result<i64> {
        let (status, body) = self
            .post(
                "/api/admin/products",
                Some(admin_token),
                json!({
                    "name": format!("Kanjivaram Silk {}", uuid::Uuid::new_v4().simple()),
                    "description": "Handwoven pure silk",
                    "price": 1500,
                    "category": "Silk",
                    "images": ["https://img.example.com/kanjivaram.jpg"],
                    "stockQuantity": stock,
                }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create product failed: {} {}", status, body);
        body["product"]["id"].as_i64().context("missing product id")
    }
}

async fn read(response: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}
