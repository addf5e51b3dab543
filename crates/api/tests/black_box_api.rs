use std::sync::Arc;

use reqwest::StatusCode;
use sale_revoke_infra::DemoData;
use sale_revoke_sales::RevokeVariant;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    demo: DemoData,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(variant: RevokeVariant) -> Self {
        // Same router as prod, seeded store, ephemeral port.
        let (services, demo) = sale_revoke_api::app::build_services(variant, true).unwrap();
        let app = sale_revoke_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            demo: demo.expect("demo data was requested"),
            client: reqwest::Client::new(),
            handle,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_reports_active_variant() {
    let server = TestServer::spawn(RevokeVariant::Recreated).await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["variant"], "recreated");
}

#[tokio::test]
async fn sale_summary_exposes_buttons() {
    let server = TestServer::spawn(RevokeVariant::Ignored).await;

    let (status, body) = server.get(&format!("/sales/{}", server.demo.revocable)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "SO-1001");
    assert_eq!(body["state"], "processing");
    assert_eq!(body["buttons"]["revoke"], true);
    assert_eq!(body["buttons"]["create_pending_moves"], false);

    let (_, body) = server.get(&format!("/sales/{}", server.demo.with_pending)).await;
    assert_eq!(body["state"], "done");
    assert_eq!(body["buttons"]["revoke"], false);
    assert_eq!(body["buttons"]["create_pending_moves"], true);
    assert_eq!(body["outstanding_moves"].as_array().unwrap().len(), 2);

    let (status, body) = server.get("/sales").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn blocked_batch_is_rejected_without_side_effects() {
    let server = TestServer::spawn(RevokeVariant::Ignored).await;
    let ids = json!({"ids": [server.demo.revocable.to_string(), server.demo.blocked.to_string()]});

    let (status, body) = server.post("/sales/revoke", ids).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "cannot_revoke");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("SO-1002"), "{message}");
    assert!(message.contains("2u [W-1] Widget, OUT-1002"), "{message}");

    let (_, body) = server.get(&format!("/sales/{}", server.demo.revocable)).await;
    assert_eq!(body["state"], "processing");
}

#[tokio::test]
async fn revoke_then_create_pending_orders() {
    let server = TestServer::spawn(RevokeVariant::Ignored).await;
    let revocable = server.demo.revocable.to_string();

    let (status, body) = server.post("/sales/revoke", json!({"ids": [revocable]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revoked"], json!([revocable]));

    let (_, body) = server.get(&format!("/sales/{revocable}")).await;
    assert_eq!(body["state"], "done");
    assert_eq!(body["buttons"]["create_pending_moves"], true);

    let ids = json!({"ids": [revocable, server.demo.with_pending.to_string()]});
    let (status, body) = server.post("/sales/create-pending-moves", ids).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "sale.sale");
    assert_eq!(body["res_ids"].as_array().unwrap().len(), 2);
    assert_eq!(body["views"], json!(["tree", "form"]));
}

#[tokio::test]
async fn single_pending_order_opens_in_form_view() {
    let server = TestServer::spawn(RevokeVariant::Ignored).await;
    let ids = json!({"ids": [server.demo.with_pending.to_string()]});

    let (status, body) = server.post("/sales/create-pending-moves", ids).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], json!(["form", "tree"]));

    let new_id = body["res_ids"][0].as_str().unwrap().to_string();
    let (status, sale) = server.get(&format!("/sales/{new_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sale["state"], "draft");
    assert_eq!(sale["number"], Value::Null);
    assert_eq!(sale["lines"][0]["quantity"], "7");
    assert_eq!(sale["lines"][0]["unit"], "u");
}

#[tokio::test]
async fn malformed_and_unknown_ids_are_reported() {
    let server = TestServer::spawn(RevokeVariant::Ignored).await;

    let (status, body) = server.post("/sales/revoke", json!({"ids": ["not-a-uuid"]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    let unknown = sale_revoke_sales::SaleId::new();
    let (status, body) = server.get(&format!("/sales/{unknown}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
