#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use devportal::{
    auth::{self, token::TokenSigner},
    model::{user, AppState, Database},
};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration test secret";
pub const TTL: Duration = Duration::from_secs(8 * 60 * 60);

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
    pub user_id: user::Id,
}

/// An app backed by an in-memory database holding one user.
pub async fn spawn_app() -> TestApp {
    let database = Database::in_memory().expect("in-memory database opens");
    let signer = TokenSigner::new(SECRET, TTL);
    let state = Arc::new(AppState::new(database, signer).expect("decoy hash"));

    let user_id = add_user(&state, EMAIL, PASSWORD).await;
    let router = devportal::router(state.clone());

    TestApp {
        state,
        router,
        user_id,
    }
}

pub async fn add_user(state: &AppState, email: &str, password: &str) -> user::Id {
    let hash = auth::hash::hash_password(password).expect("password hashes");
    state
        .database
        .lock()
        .await
        .add_user(email, &hash)
        .expect("user is added")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .map(|value| value.to_str().expect("cookie is ascii"))
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = hyper::body::to_bytes(response.into_body())
            .await
            .expect("body reads");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is json")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "email": email, "password": password });
        self.send(json_request("POST", "/api/auth/login", body.to_string()))
            .await
    }

    /// Log in as the seeded user and return the `auth_token` cookie pair.
    pub async fn session_cookie(&self) -> String {
        let response = self.login(EMAIL, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK);
        let cookie = response.set_cookie().expect("login sets a cookie");
        cookie
            .split(';')
            .next()
            .expect("cookie has a pair")
            .to_string()
    }
}

pub fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::COOKIE,
        cookie.parse().expect("cookie is a valid header value"),
    );
    request
}
