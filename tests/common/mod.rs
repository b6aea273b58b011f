//! Shared harness: an in-memory app driven through `tower::ServiceExt::oneshot`
//! with a tiny cookie store standing in for the browser.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use regdesk::config::{Config, DatabaseConfig};
use regdesk::AppState;

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

pub struct TestClient {
    app: Router,
    cookies: HashMap<String, String>,
}

pub async fn test_state() -> AppState {
    let mut config = Config::default();
    config.auth.secret_key = Some("integration-test-secret".to_string());
    config.database = DatabaseConfig::in_memory();
    let db = regdesk::db::init(&config.database)
        .await
        .expect("in-memory database");
    AppState::new(config, db)
}

impl TestClient {
    pub async fn new() -> Self {
        Self::with_state(test_state().await)
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            app: regdesk::api::create_router(state),
            cookies: HashMap::new(),
        }
    }

    /// A second browser against the same app
    pub fn fresh_browser(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookies: HashMap::new(),
        }
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let pair = value.to_str().unwrap().split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Submit a form that must redirect, then follow it like a browser would
    pub async fn post_and_follow(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        expected: &str,
    ) -> TestResponse {
        let res = self.post(uri, fields).await;
        res.assert_redirect(expected);
        self.get(expected).await
    }

    pub async fn signup_admin(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_and_follow(
            "/admin/register",
            &[("username", username), ("password", password)],
            "/admin/login",
        )
        .await
    }

    pub async fn login_admin(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_and_follow(
            "/admin/login",
            &[("username", username), ("password", password)],
            "/",
        )
        .await
    }

    pub async fn signup_user(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> TestResponse {
        self.post_and_follow(
            "/user/register",
            &[("username", username), ("email", email), ("password", password)],
            "/user/login",
        )
        .await
    }

    pub async fn login_user(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_and_follow(
            "/user/login",
            &[("username", username), ("password", password)],
            "/user/dashboard",
        )
        .await
    }

    /// Create a product as the logged-in admin and return its id
    pub async fn create_product(&mut self, title: &str) -> i64 {
        let res = self
            .post(
                "/create",
                &[
                    ("title", title),
                    ("description", "Bring a laptop"),
                    ("location", "Room 4"),
                    ("date", "2026-11-20T18:30"),
                ],
            )
            .await;
        res.assert_redirect("/");
        let listing = self.get("/").await;
        product_id_for(&listing.body, title)
    }
}

/// Pull the id out of the `/products/{id}` link whose text is `title`
pub fn product_id_for(html: &str, title: &str) -> i64 {
    let marker = format!("\">{title}</a>");
    let end = html.find(&marker).expect("product link");
    let start = html[..end].rfind("/products/").expect("product href") + "/products/".len();
    html[start..end].parse().expect("numeric id")
}

fn encode(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
