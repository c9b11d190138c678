use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use cookgenie_api::app::{self, services::AppServices};
use cookgenie_core::{FixedClock, InventoryItemId, ProfileId};
use cookgenie_infra::{InMemoryProfileStore, ProfileStore};
use cookgenie_inventory::{InventoryItem, Unit};
use cookgenie_profiles::{Profile, UserPreferences};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, pinned to `today`, bound to an ephemeral port.
    async fn spawn(today: NaiveDate) -> Self {
        Self::spawn_with_items(today, Arc::new(InMemoryProfileStore::new())).await
    }

    /// Like [`TestServer::spawn`], over an inventory store the test can seed.
    async fn spawn_with_items(
        today: NaiveDate,
        items: Arc<InMemoryProfileStore<InventoryItem>>,
    ) -> Self {
        let services = Arc::new(AppServices::new(
            Arc::new(InMemoryProfileStore::<Profile>::new()),
            Arc::new(InMemoryProfileStore::<UserPreferences>::new()),
            items,
            Arc::new(FixedClock::on(today)),
        ));
        let router = app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn june_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

async fn create_profile(client: &reqwest::Client, srv: &TestServer, name: &str) -> ProfileId {
    let res = client
        .post(srv.url("/api/profiles"))
        .json(&json!({ "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().parse().unwrap()
}

async fn expiry_alerts(
    client: &reqwest::Client,
    srv: &TestServer,
    profile_id: ProfileId,
) -> serde_json::Value {
    let res = client
        .get(srv.url(&format!("/api/inventory/profile/{profile_id}/expiry-alerts")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn create(
    client: &reqwest::Client,
    srv: &TestServer,
    profile_id: ProfileId,
    name: &str,
    quantity: f64,
    expiry_date: Option<&str>,
) -> serde_json::Value {
    let res = client
        .post(srv.url("/api/inventory"))
        .json(&json!({
            "profile_id": profile_id.to_string(),
            "name": name,
            "quantity": quantity,
            "unit": "piece",
            "expiry_date": expiry_date,
        }))
        .send()
        .await
        .unwrap();
    if res.status() != StatusCode::CREATED {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        panic!("expected 201 Created, got {status} body={body}");
    }
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(june_10()).await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn inventory_lifecycle_create_update_delete() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    let created = create(&client, &srv, profile_id, "Milk", 2.0, Some("2024-06-10")).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Milk");
    assert_eq!(created["unit"], "piece");
    assert_eq!(created["expiry"]["days_until_expiry"], 0);
    assert_eq!(created["expiry"]["status"], "expires_today");
    assert_eq!(created["expiry"]["severity"], "high");
    assert_eq!(created["expiry"]["label"], "Expires today");

    let res = client
        .put(srv.url(&format!("/api/inventory/{id}")))
        .json(&json!({ "quantity": 0.5, "expiry_date": "2024-06-05" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["quantity"], 0.5);
    assert_eq!(updated["name"], "Milk");
    assert_eq!(updated["expiry"]["days_until_expiry"], -5);
    assert_eq!(updated["expiry"]["status"], "expired");
    assert_eq!(updated["expiry"]["severity"], "critical");

    let res = client
        .get(srv.url(&format!("/api/inventory/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(srv.url(&format!("/api/inventory/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/api/inventory/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn invalid_payloads_and_ids_are_rejected() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();

    let profile_id = create_profile(&client, &srv, "Sam").await;

    let res = client
        .post(srv.url("/api/inventory"))
        .json(&json!({
            "profile_id": profile_id.to_string(),
            "name": "Eggs",
            "quantity": 0,
            "unit": "piece",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .get(srv.url("/api/inventory/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn expiry_alerts_are_sorted_and_exclude_fresh_and_undated() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    create(&client, &srv, profile_id, "Yogurt", 1.0, Some("2024-06-17")).await;
    create(&client, &srv, profile_id, "Spinach", 1.0, Some("2024-06-05")).await;
    create(&client, &srv, profile_id, "Rice", 1.0, None).await;
    create(&client, &srv, profile_id, "Cheese", 1.0, Some("2024-07-01")).await;
    create(&client, &srv, profile_id, "Bread", 1.0, Some("2024-06-11")).await;
    // Another profile's items never leak into this list.
    let other = create_profile(&client, &srv, "Alex").await;
    create(&client, &srv, other, "Fish", 1.0, Some("2024-06-09")).await;

    let body = expiry_alerts(&client, &srv, profile_id).await;

    assert_eq!(body["as_of"], "2024-06-10");
    assert_eq!(body["total"], 3);
    let alerts = body["alerts"].as_array().unwrap();
    let names: Vec<&str> = alerts
        .iter()
        .map(|a| a["item"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Spinach", "Bread", "Yogurt"]);

    assert_eq!(alerts[0]["status"], "expired");
    assert_eq!(alerts[0]["summary"], "Expired");
    assert_eq!(alerts[1]["status"], "expiring_soon");
    assert_eq!(alerts[1]["summary"], "Expires in 1 day");
    assert_eq!(alerts[2]["status"], "expiring_this_week");
    assert_eq!(alerts[2]["days_until_expiry"], 7);
    assert!(body["skipped_item_ids"].as_array().unwrap().is_empty());

    let res = client
        .get(srv.url(&format!(
            "/api/inventory/profile/{profile_id}/expiry-alerts?limit=1"
        )))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 3);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn low_stock_uses_threshold() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    create(&client, &srv, profile_id, "Salt", 0.5, None).await;
    create(&client, &srv, profile_id, "Sugar", 1.0, None).await;
    create(&client, &srv, profile_id, "Flour", 3.0, None).await;

    let res = client
        .get(srv.url(&format!("/api/inventory/profile/{profile_id}/low-stock")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let res = client
        .get(srv.url(&format!(
            "/api/inventory/profile/{profile_id}/low-stock?threshold=5"
        )))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 3);

    let res = client
        .get(srv.url(&format!(
            "/api/inventory/profile/{profile_id}/low-stock?threshold=-1"
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_listing_is_scoped() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let alice = create_profile(&client, &srv, "Alice").await;
    let bob = create_profile(&client, &srv, "Bob").await;

    create(&client, &srv, alice, "Apples", 6.0, Some("2024-06-20")).await;
    create(&client, &srv, bob, "Pears", 4.0, None).await;

    let res = client
        .get(srv.url(&format!("/api/inventory/profile/{alice}")))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Apples");
    assert_eq!(items[0]["expiry"]["status"], "fresh");
    assert_eq!(items[0]["expiry"]["severity"], "low");

    let res = client
        .get(srv.url(&format!("/api/inventory/profile/{bob}")))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body[0]["expiry"], serde_json::Value::Null);
}

#[tokio::test]
async fn null_in_update_clears_the_expiry_date() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    let created = create(&client, &srv, profile_id, "Spinach", 1.0, Some("2024-06-05")).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(expiry_alerts(&client, &srv, profile_id).await["total"], 1);

    let res = client
        .put(srv.url(&format!("/api/inventory/{id}")))
        .json(&json!({ "expiry_date": null, "category": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["expiry_date"], serde_json::Value::Null);
    assert_eq!(updated["expiry"], serde_json::Value::Null);
    assert_eq!(updated["name"], "Spinach");

    let body = expiry_alerts(&client, &srv, profile_id).await;
    assert_eq!(body["total"], 0);
    assert!(body["alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn offset_timestamps_use_the_reference_day() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    // 23:30 at UTC-05:00 on the 9th is already the 10th in UTC.
    let created = create(
        &client,
        &srv,
        profile_id,
        "Fish",
        1.0,
        Some("2024-06-09T23:30:00-05:00"),
    )
    .await;
    assert_eq!(created["expiry"]["days_until_expiry"], 0);
    assert_eq!(created["expiry"]["status"], "expires_today");
}

#[tokio::test]
async fn legacy_malformed_dates_are_skipped_not_fatal() {
    let items = Arc::new(InMemoryProfileStore::<InventoryItem>::new());
    let srv = TestServer::spawn_with_items(june_10(), Arc::clone(&items)).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;

    create(&client, &srv, profile_id, "Bread", 1.0, Some("2024-06-11")).await;

    let now = Utc::now();
    let legacy = InventoryItem {
        id: InventoryItemId::new(),
        profile_id,
        name: "Flour".to_string(),
        quantity: 1.0,
        unit: Unit::Kilogram,
        category: None,
        expiry_date: Some("31/12/2023".to_string()),
        purchase_date: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    items.upsert(legacy.clone());

    let body = expiry_alerts(&client, &srv, profile_id).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["alerts"][0]["item"]["name"], "Bread");
    assert_eq!(body["skipped_item_ids"], json!([legacy.id.to_string()]));

    let res = client
        .get(srv.url(&format!("/api/inventory/{}", legacy.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let item: serde_json::Value = res.json().await.unwrap();
    assert_eq!(item["expiry_date"], "31/12/2023");
    assert_eq!(item["expiry"], serde_json::Value::Null);
}

#[tokio::test]
async fn inventory_requires_a_known_profile() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/inventory"))
        .json(&json!({
            "profile_id": ProfileId::new().to_string(),
            "name": "Eggs",
            "quantity": 6,
            "unit": "piece",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "profile not found");
}

#[tokio::test]
async fn profile_crud_and_email_uniqueness() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/profiles"))
        .json(&json!({ "name": "Sam", "email": "sam@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let sam: serde_json::Value = res.json().await.unwrap();
    let sam_id = sam["id"].as_str().unwrap().to_string();

    let res = client
        .post(srv.url("/api/profiles"))
        .json(&json!({ "name": "Impostor", "email": "Sam@Example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    let res = client
        .put(srv.url(&format!("/api/profiles/{sam_id}")))
        .json(&json!({ "name": "Samira", "email": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Samira");
    assert_eq!(updated["email"], serde_json::Value::Null);

    let res = client.get(srv.url("/api/profiles")).send().await.unwrap();
    let all: serde_json::Value = res.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);

    let res = client
        .delete(srv.url(&format!("/api/profiles/{sam_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/api/profiles/{sam_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "profile not found");
}

#[tokio::test]
async fn preferences_are_one_per_profile() {
    let srv = TestServer::spawn(june_10()).await;
    let client = reqwest::Client::new();
    let profile_id = create_profile(&client, &srv, "Sam").await;
    let payload = json!({
        "profile_id": profile_id.to_string(),
        "dietary_restrictions": ["vegan"],
        "max_cooking_time": 45,
        "skill_level": "intermediate",
    });

    let res = client
        .post(srv.url("/api/preferences"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(srv.url("/api/preferences"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .put(srv.url(&format!("/api/preferences/{profile_id}")))
        .json(&json!({ "max_cooking_time": null, "preferred_cuisines": ["Indian"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let prefs: serde_json::Value = res.json().await.unwrap();
    assert_eq!(prefs["max_cooking_time"], serde_json::Value::Null);
    assert_eq!(prefs["preferred_cuisines"], json!(["Indian"]));
    assert_eq!(prefs["dietary_restrictions"], json!(["vegan"]));
    assert_eq!(prefs["skill_level"], "intermediate");

    // Deleting the profile takes its preferences and inventory with it.
    create(&client, &srv, profile_id, "Rice", 1.0, None).await;
    let res = client
        .delete(srv.url(&format!("/api/profiles/{profile_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/api/preferences/{profile_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "preferences not found");

    let res = client
        .get(srv.url(&format!("/api/inventory/profile/{profile_id}")))
        .send()
        .await
        .unwrap();
    let items: serde_json::Value = res.json().await.unwrap();
    assert!(items.as_array().unwrap().is_empty());
}
