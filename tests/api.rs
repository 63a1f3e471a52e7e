use axum::{body::Body, Router};
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use daybook::config::{SecuritySettings, ServerSettings, Settings, StorageSettings};
use daybook::state::AppState;

// Shared test context: a router over a throwaway storage root.
struct TestContext {
    app: Router,
    _dir: TempDir,
    root: std::path::PathBuf,
}

impl TestContext {
    fn new(password: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("diary");
        let settings = Settings {
            title: "daybook test".to_string(),
            server: ServerSettings { port: 0 },
            security: SecuritySettings {
                password: password.to_string(),
            },
            storage: StorageSettings {
                diary_root: root.to_string_lossy().into_owned(),
            },
        };
        let state = AppState::new(settings, root.clone()).unwrap();
        Self {
            app: daybook::app(state),
            _dir: dir,
            root,
        }
    }

    async fn request(&self, req: Request<Body>) -> http::Response<Body> {
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn login(&self, password: &str) -> http::Response<Body> {
        self.request(
            Request::post("/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "password": password }).to_string()))
                .unwrap(),
        )
        .await
    }

    /// Logs in with the right password and returns the `auth=...`
    /// cookie pair for subsequent requests.
    async fn login_cookie(&self, password: &str) -> String {
        let response = self.login(password).await;
        assert_eq!(response.status(), StatusCode::OK);
        auth_cookie(&response).expect("login did not set an auth cookie")
    }

    async fn get(&self, uri: &str, cookie: &str) -> http::Response<Body> {
        self.request(
            Request::get(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_json(&self, uri: &str, cookie: &str, body: Value) -> http::Response<Body> {
        self.request(
            Request::post(uri)
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn auth_cookie(response: &http::Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    pair.starts_with("auth=").then(|| pair.to_string())
}

async fn json_body(response: http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn login_with_wrong_password_is_denied_and_sets_no_cookie() {
    let ctx = TestContext::new("hunter2");

    let response = ctx.login("not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(auth_cookie(&response).is_none());

    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_with_the_right_password_issues_a_token_cookie() {
    let ctx = TestContext::new("hunter2");

    let cookie = ctx.login_cookie("hunter2").await;
    let token = cookie.strip_prefix("auth=").unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[tokio::test]
async fn protected_routes_deny_requests_without_a_token() {
    let ctx = TestContext::new("hunter2");

    for uri in ["/api/diary-dates", "/api/diary/20230615", "/api/session"] {
        let response = ctx
            .request(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn protected_routes_deny_a_token_from_a_different_secret() {
    let other = TestContext::new("other-secret");
    let stale = other.login_cookie("other-secret").await;

    let ctx = TestContext::new("hunter2");
    let response = ctx.get("/api/session", &stale).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn entry_written_via_one_encoding_reads_back_via_both() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    let response = ctx
        .post_json(
            "/api/diary/2023-06-15",
            &cookie,
            json!({ "content": "Today was sunny." }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);

    for uri in ["/api/diary/20230615", "/api/diary/2023-06-15"] {
        let response = ctx.get(uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["date"], "2023-06-15");
        assert_eq!(body["content"], "Today was sunny.");
    }

    let response = ctx.get("/api/diary-dates", &cookie).await;
    let dates = json_body(response).await;
    assert_eq!(dates, json!(["20230615"]));

    // Persisted layout: <root>/<year>/<compact>.txt, body exactly the
    // entry content.
    let on_disk = std::fs::read(ctx.root.join("2023").join("20230615.txt")).unwrap();
    assert_eq!(on_disk, b"Today was sunny.");
}

#[tokio::test]
async fn a_day_never_written_reads_as_empty_content() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    let response = ctx.get("/api/diary/20010101", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["content"], "");
}

#[tokio::test]
async fn saving_replaces_prior_content_entirely() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    for content in ["a long first draft of the day", "short final"] {
        let response = ctx
            .post_json("/api/diary/20230615", &cookie, json!({ "content": content }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = json_body(ctx.get("/api/diary/20230615", &cookie).await).await;
    assert_eq!(body["content"], "short final");
}

#[tokio::test]
async fn dates_are_listed_sorted_ascending_regardless_of_write_order() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    for date in ["20230215", "20220101", "20230101"] {
        let uri = format!("/api/diary/{}", date);
        let response = ctx.post_json(&uri, &cookie, json!({ "content": "x" })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let dates = json_body(ctx.get("/api/diary-dates", &cookie).await).await;
    assert_eq!(dates, json!(["20220101", "20230101", "20230215"]));
}

#[tokio::test]
async fn malformed_dates_are_rejected_with_bad_request() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    for date in ["20230230", "2023-02-30", "2023x615", "2023/06/15", "notadate"] {
        let uri = format!("/api/diary/{}", date);

        let response = ctx.get(&uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", date);

        let response = ctx.post_json(&uri, &cookie, json!({ "content": "x" })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "POST {}", date);
    }

    // Nothing was coerced to a nearby valid date.
    let dates = json_body(ctx.get("/api/diary-dates", &cookie).await).await;
    assert_eq!(dates, json!([]));
}

#[tokio::test]
async fn session_endpoint_reports_the_configured_title() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    let body = json_body(ctx.get("/api/session", &cookie).await).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["title"], "daybook test");
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let ctx = TestContext::new("hunter2");
    let cookie = ctx.login_cookie("hunter2").await;

    let response = ctx
        .request(
            Request::post("/api/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("auth="));
    assert!(set_cookie.contains("Max-Age=0"));
}
