use chrono::{Datelike, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use naycourse_api::app::{build_app, AppConfig};
use naycourse_auth::{Claims, Role};
use naycourse_core::UserId;
use naycourse_orders::{LifecycleConfig, TimeFormat};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        Self::spawn_with(jwt_secret, LifecycleConfig::default()).await
    }

    async fn spawn_with(jwt_secret: &str, lifecycle: LifecycleConfig) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(AppConfig {
            jwt_secret: jwt_secret.to_string(),
            lifecycle,
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, user_id: UserId, role: Role) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn order_body() -> serde_json::Value {
    json!({
        "expediteur": { "nomComplet": "Awa Diabaté", "telephone": "0700000000" },
        "destinataire": {
            "nomComplet": "Binta Koné",
            "whatsapp": "0711111111",
            "adresse": "Cocody"
        },
        "colis": { "dateLivraison": "2025-03-01", "heureLivraison": "14:00" },
        "acceptCGU": true
    })
}

async fn create_order(client: &reqwest::Client, base_url: &str) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/orders"))
        .json(&order_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn guest_can_create_an_order_and_gets_a_canonical_reference() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let body = create_order(&client, &srv.base_url).await;

    let order_ref = body["order"]["orderRef"].as_str().unwrap();
    assert_eq!(order_ref, format!("nay/{}-00001-ci", Utc::now().year()));
    assert_eq!(body["order"]["state"], "pending");
    assert_eq!(body["order"]["ownerId"], serde_json::Value::Null);
    // The receiver's phone fell back to the WhatsApp contact.
    assert_eq!(body["receiver"]["phone"], "0711111111");
    assert_eq!(body["sender"]["address"], "Adresse non spécifiée");
}

#[tokio::test]
async fn refusing_the_terms_rejects_the_order() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let mut body = order_body();
    body["acceptCGU"] = json!(false);

    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "validation_error");
    assert!(err["message"]
        .as_str()
        .unwrap()
        .contains("conditions générales"));
}

#[tokio::test]
async fn delivery_time_format_is_a_deployment_option() {
    let srv = TestServer::spawn_with(
        "test-secret",
        LifecycleConfig {
            delivery_time_format: TimeFormat::HourHMinute,
            ..LifecycleConfig::default()
        },
    )
    .await;
    let client = reqwest::Client::new();

    let mut body = order_body();
    body["colis"]["heureLivraison"] = json!("14h00");
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["parcel"]["deliveryTime"], "14h00");

    // The colon spelling is now the rejected one.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&order_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    for path in ["/whoami", "/orders", "/manager/inbox"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn whoami_reflects_the_token() {
    let srv = TestServer::spawn("test-secret").await;
    let user_id = UserId::new();
    let token = mint_jwt("test-secret", user_id, Role::Manager);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["role"], "manager");
}

#[tokio::test]
async fn clients_cannot_reach_the_manager_console() {
    let srv = TestServer::spawn("test-secret").await;
    let token = mint_jwt("test-secret", UserId::new(), Role::Client);
    let client = reqwest::Client::new();

    for path in ["/orders", "/manager/inbox", "/manager/orders/pending", "/manager/trash"] {
        let res = client
            .get(format!("{}{path}", srv.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn owners_see_their_orders_and_nobody_elses() {
    let srv = TestServer::spawn("test-secret").await;
    let owner_id = UserId::new();
    let owner = mint_jwt("test-secret", owner_id, Role::Client);
    let client = reqwest::Client::new();

    // Authenticated creation attaches ownership.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .bearer_auth(&owner)
        .json(&order_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["order"]["ownerId"], owner_id.to_string());
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/orders/user/{owner_id}", srv.base_url))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Another client can neither list the owner's orders nor read one.
    let stranger = mint_jwt("test-secret", UserId::new(), Role::Client);
    let res = client
        .get(format!("{}/orders/user/{owner_id}", srv.base_url))
        .bearer_auth(&stranger)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/orders/{order_id}", srv.base_url))
        .bearer_auth(&stranger)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn order_can_be_fetched_by_its_reference() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let order_ref = created["order"]["orderRef"].as_str().unwrap();

    let res = client
        .get(format!("{}/orders/ref/{order_ref}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["order"]["id"], created["order"]["id"]);
}

#[tokio::test]
async fn lifecycle_happy_path_runs_to_delivered() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/manager/orders/{id}/validate", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "prix": 2500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["state"], "confirmed");
    assert_eq!(body["price"], 2500);

    let res = client
        .patch(format!(
            "{}/manager/orders/{id}/assign-courier",
            srv.base_url
        ))
        .bearer_auth(&manager)
        .json(&json!({
            "coursier": { "nomComplet": "Koffi", "telephone": "0709000000" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["state"], "in_progress");
    assert_eq!(body["courierAssignment"]["name"], "Koffi");

    let res = client
        .patch(format!("{}/manager/orders/{id}/delivered", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["state"], "delivered");

    // The trail holds creation, validation and assignment entries, and the
    // assignment one carries the notification text.
    let res = client
        .get(format!("{}/manager/inbox", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let inbox: serde_json::Value = res.json().await.unwrap();
    let entries = inbox.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let assignment = entries
        .iter()
        .find(|e| e["action"] == "assignation_coursier")
        .unwrap();
    assert!(assignment["message"]
        .as_str()
        .unwrap()
        .contains("2500 FCFA"));
}

#[tokio::test]
async fn underpriced_validation_is_rejected_without_a_trace() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/manager/orders/{id}/validate", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "prix": 200 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert!(err["message"].as_str().unwrap().contains("500 FCFA"));

    // Order untouched, no validation entry written.
    let res = client
        .get(format!("{}/orders/{id}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["order"]["state"], "pending");
    assert_eq!(body["order"]["price"], 0);

    let res = client
        .get(format!("{}/manager/inbox", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let inbox: serde_json::Value = res.json().await.unwrap();
    assert!(inbox
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["action"] != "validation"));
}

#[tokio::test]
async fn assigning_a_nameless_courier_is_rejected() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!(
            "{}/manager/orders/{id}/assign-courier",
            srv.base_url
        ))
        .bearer_auth(&manager)
        .json(&json!({ "coursier": { "nomComplet": "", "telephone": "" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/orders/{id}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["order"]["state"], "pending");
    assert!(body["order"]["courierAssignment"].is_null());
}

#[tokio::test]
async fn terminal_orders_refuse_further_transitions() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/manager/orders/{id}/cancel", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "motif": "Client injoignable" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["state"], "cancelled");
    assert_eq!(body["cancellationReason"], "Client injoignable");

    let res = client
        .patch(format!("{}/manager/orders/{id}/validate", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "prix": 2500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "invalid_transition");
}

#[tokio::test]
async fn viewed_flag_is_orthogonal_to_the_lifecycle() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/manager/orders/{id}/viewed", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["viewed"], true);
    assert_eq!(body["state"], "pending");
}

#[tokio::test]
async fn trash_and_restore_issue_a_new_identity() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();
    let old_ref = created["order"]["orderRef"].as_str().unwrap();

    let res = client
        .post(format!("{}/manager/move-to-trash", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "itemId": id, "itemType": "order" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let vault_entry: serde_json::Value = res.json().await.unwrap();
    assert_eq!(vault_entry["itemType"], "order");
    let vault_id = vault_entry["id"].as_str().unwrap();

    // Gone from the live store.
    let res = client
        .get(format!("{}/orders/{id}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/manager/trash", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let trash: serde_json::Value = res.json().await.unwrap();
    assert_eq!(trash.as_array().unwrap().len(), 1);

    let res = client
        .patch(format!("{}/manager/trash/{vault_id}/restore", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let restored: serde_json::Value = res.json().await.unwrap();

    assert_ne!(restored["order"]["id"].as_str().unwrap(), id);
    assert_ne!(restored["order"]["orderRef"].as_str().unwrap(), old_ref);
    assert_eq!(restored["order"]["state"], "pending");
    assert_eq!(restored["order"]["restoredFrom"], vault_id);
    // Satellites follow the new reference.
    assert_eq!(
        restored["sender"]["orderRef"],
        restored["order"]["orderRef"]
    );

    // The vault entry is consumed.
    let res = client
        .get(format!("{}/manager/trash", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let trash: serde_json::Value = res.json().await.unwrap();
    assert!(trash.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn hard_delete_leaves_nothing_behind() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();
    let order_ref = created["order"]["orderRef"].as_str().unwrap();

    let res = client
        .delete(format!("{}/orders/{id}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/orders/{id}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/orders/ref/{order_ref}", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unlike move-to-trash, nothing lands in the vault.
    let res = client
        .get(format!("{}/manager/trash", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    let trash: serde_json::Value = res.json().await.unwrap();
    assert!(trash.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn courier_roster_enforces_phone_uniqueness() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/manager/coursiers", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "nomComplet": "Koffi", "telephone": "0709000000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let courier: serde_json::Value = res.json().await.unwrap();
    assert_eq!(courier["status"], "active");

    let res = client
        .post(format!("{}/manager/coursiers", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "nomComplet": "Yao", "telephone": "0709000000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn assignment_can_reference_the_roster() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/manager/coursiers", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({ "nomComplet": "Koffi", "telephone": "0709000000" }))
        .send()
        .await
        .unwrap();
    let courier: serde_json::Value = res.json().await.unwrap();
    let courier_id = courier["id"].as_str().unwrap();

    let created = create_order(&client, &srv.base_url).await;
    let id = created["order"]["id"].as_str().unwrap();

    let res = client
        .patch(format!(
            "{}/manager/orders/{id}/assign-courier",
            srv.base_url
        ))
        .bearer_auth(&manager)
        .json(&json!({ "coursierId": courier_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["courierAssignment"]["name"], "Koffi");
    assert_eq!(body["courierAssignment"]["phone"], "0709000000");
}

#[tokio::test]
async fn inbox_note_flips_from_pending_to_done() {
    let srv = TestServer::spawn("test-secret").await;
    let manager = mint_jwt("test-secret", UserId::new(), Role::Manager);
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv.base_url).await;
    let order_ref = created["order"]["orderRef"].as_str().unwrap();

    let res = client
        .post(format!("{}/manager/inbox", srv.base_url))
        .bearer_auth(&manager)
        .json(&json!({
            "commande": order_ref,
            "client": "Awa Diabaté",
            "details": "Adresse à confirmer avant départ"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let note: serde_json::Value = res.json().await.unwrap();
    assert_eq!(note["status"], "pending");
    let note_id = note["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/manager/inbox/{note_id}/done", srv.base_url))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let done: serde_json::Value = res.json().await.unwrap();
    assert_eq!(done["status"], "done");
}

#[tokio::test]
async fn pricing_estimate_is_public() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/pricing/estimate", srv.base_url))
        .json(&json!({ "depart": "Plateau", "arrivee": "Cocody" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let quote: serde_json::Value = res.json().await.unwrap();
    assert!(quote["distanceKm"].as_f64().unwrap() > 0.0);
    assert!(quote["price"].as_u64().unwrap() >= 500);

    let res = client
        .post(format!("{}/pricing/estimate", srv.base_url))
        .json(&json!({ "depart": "Plateau", "arrivee": "Atlantide" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "unresolvable_address");
}
