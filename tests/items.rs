mod common;

use axum::http::StatusCode;
use common::TestClient;

fn item_id_for(html: &str, title: &str) -> i64 {
    let marker = format!("\">{title}</a>");
    let end = html.find(&marker).expect("item link");
    let start = html[..end].rfind("/items/").expect("item href") + "/items/".len();
    html[start..end].parse().expect("numeric id")
}

#[tokio::test]
async fn test_item_lifecycle() {
    let mut admin = TestClient::new().await;
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;

    let listing = admin
        .post_and_follow(
            "/items/create",
            &[("title", "Projector"), ("description", "HDMI only")],
            "/items",
        )
        .await;
    assert!(listing.body.contains("Item created successfully."));
    let id = item_id_for(&listing.body, "Projector");

    let mut visitor = admin.fresh_browser();
    let detail = visitor.get(&format!("/items/{id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("HDMI only"));

    let detail = admin
        .post_and_follow(
            &format!("/items/edit/{id}"),
            &[("title", "Beamer"), ("description", "")],
            &format!("/items/{id}"),
        )
        .await;
    assert!(detail.body.contains("Item updated."));
    assert!(detail.body.contains("Beamer"));

    let listing = admin
        .post_and_follow(&format!("/items/delete/{id}"), &[], "/items")
        .await;
    assert!(listing.body.contains("Item deleted."));
    assert_eq!(
        visitor.get(&format!("/items/{id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_item_requires_title() {
    let mut admin = TestClient::new().await;
    admin.signup_admin("root", "toor").await;
    admin.login_admin("root", "toor").await;

    let res = admin
        .post("/items/create", &[("title", "   "), ("description", "x")])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.contains("Title is required."));
}

#[tokio::test]
async fn test_item_mutations_need_admin() {
    let mut visitor = TestClient::new().await;
    assert_eq!(visitor.get("/items").await.status, StatusCode::OK);
    visitor
        .post("/items/create", &[("title", "Sneaky")])
        .await
        .assert_redirect("/admin/login");
}

#[tokio::test]
async fn test_static_pages() {
    let mut client = TestClient::new().await;
    assert_eq!(client.get("/about").await.status, StatusCode::OK);
    assert_eq!(client.get("/estimate").await.status, StatusCode::OK);
    let health = client.get("/health").await;
    assert_eq!(health.body, "OK");
}
