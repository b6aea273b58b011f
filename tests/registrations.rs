mod common;

use axum::http::StatusCode;
use common::{test_state, TestClient};
use regdesk::db::RegistrationStatus;

#[tokio::test]
async fn test_register_then_approve() {
    let state = test_state().await;
    let mut admin = TestClient::with_state(state.clone());
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;
    let product_id = admin.create_product("Rust Meetup").await;

    let mut user = admin.fresh_browser();
    user.signup_user("ada", "ada@example.com", "hunter22").await;
    user.login_user("ada", "hunter22").await;

    let uri = format!("/user/register_products/{product_id}");
    user.post(&uri, &[])
        .await
        .assert_redirect(&format!("/products/{product_id}"));
    let detail = user.get(&format!("/products/{product_id}")).await;
    assert!(detail.body.contains("Registration submitted."));
    assert!(detail.body.contains("Status: <strong>Pending</strong>"));

    // Registering twice is a no-op
    user.post(&uri, &[]).await;
    let detail = user.get(&format!("/products/{product_id}")).await;
    assert!(detail.body.contains("You are already registered for this product."));

    let all = state.registrations.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    let registration_id = all[0].id;

    let listing = admin.get("/admin/registrations").await;
    assert!(listing.body.contains("ada"));
    assert!(listing
        .body
        .contains(&format!("approve/{registration_id}")));

    admin
        .post(&format!("/admin/registrations/approve/{registration_id}"), &[])
        .await
        .assert_redirect("/admin/registrations");
    let listing = admin.get("/admin/registrations").await;
    assert!(listing.body.contains("Registration approved."));
    assert!(!listing.body.contains(&format!("approve/{registration_id}")));

    let approved = state
        .registrations
        .find_by_id(registration_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status_enum(), RegistrationStatus::Approved);
    assert!(approved.approved_at.is_some());

    let dashboard = user.get("/user/dashboard").await;
    assert!(dashboard.body.contains("Rust Meetup"));
    assert!(dashboard.body.contains("Approved"));
}

#[tokio::test]
async fn test_reapproving_keeps_status() {
    let state = test_state().await;
    let mut admin = TestClient::with_state(state.clone());
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;
    let product_id = admin.create_product("Workshop").await;

    let mut user = admin.fresh_browser();
    user.signup_user("ada", "ada@example.com", "hunter22").await;
    user.login_user("ada", "hunter22").await;
    user.post(&format!("/user/register_products/{product_id}"), &[])
        .await;

    let id = state.registrations.list_all().await.unwrap()[0].id;
    let approve = format!("/admin/registrations/approve/{id}");
    admin.post(&approve, &[]).await.assert_redirect("/admin/registrations");
    admin.post(&approve, &[]).await.assert_redirect("/admin/registrations");

    let registration = state.registrations.find_by_id(id).await.unwrap().unwrap();
    assert!(registration.is_approved());
    assert!(registration.approved_at.is_some());
}

#[tokio::test]
async fn test_approve_unknown_registration_is_not_found() {
    let mut admin = TestClient::new().await;
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;

    let res = admin.post("/admin/registrations/approve/77", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_for_missing_product_is_not_found() {
    let mut user = TestClient::new().await;
    user.signup_user("ada", "ada@example.com", "hunter22").await;
    user.login_user("ada", "hunter22").await;

    let res = user.post("/user/register_products/9999", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_with_registrations_cannot_be_deleted() {
    let state = test_state().await;
    let mut admin = TestClient::with_state(state.clone());
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;
    let product_id = admin.create_product("Sticky").await;

    let mut user = admin.fresh_browser();
    user.signup_user("ada", "ada@example.com", "hunter22").await;
    user.login_user("ada", "hunter22").await;
    user.post(&format!("/user/register_products/{product_id}"), &[])
        .await;

    admin
        .post(&format!("/delete/{product_id}"), &[])
        .await
        .assert_redirect(&format!("/products/{product_id}"));
    let detail = admin.get(&format!("/products/{product_id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail
        .body
        .contains("This product has registrations and cannot be deleted."));
}

#[tokio::test]
async fn test_dashboard_lists_only_own_registrations() {
    let state = test_state().await;
    let mut admin = TestClient::with_state(state.clone());
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;
    let first = admin.create_product("Alpha").await;
    let second = admin.create_product("Beta").await;

    let mut ada = admin.fresh_browser();
    ada.signup_user("ada", "ada@example.com", "pw1").await;
    ada.login_user("ada", "pw1").await;
    ada.post(&format!("/user/register_products/{first}"), &[])
        .await;

    let mut bob = admin.fresh_browser();
    bob.signup_user("bob", "bob@example.com", "pw2").await;
    bob.login_user("bob", "pw2").await;
    bob.post(&format!("/user/register_products/{second}"), &[])
        .await;

    let dashboard = ada.get("/user/dashboard").await;
    assert!(dashboard.body.contains("Alpha"));
    assert!(!dashboard.body.contains("Beta"));
}
