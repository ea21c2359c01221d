#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::OnceCell;
use tower::ServiceExt;

use curator::config::AppConfig;
use curator::domain::post::{Author, Category, CommentsSummary, Post};
use curator::infra::catalog::Catalog;
use curator::AppState;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn timestamp(value: &str) -> OffsetDateTime {
    OffsetDateTime::parse(value, &Rfc3339).expect("valid RFC 3339 timestamp")
}

pub fn post(id: &str, title: &str, category: &str, upvotes: i64, created_at: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Description for {}", title),
        category: Category::parse(category),
        tags: Vec::new(),
        author: Author {
            name: format!("Author {}", id),
            avatar: "/placeholder.svg".to_string(),
        },
        upvotes,
        comments: CommentsSummary::Count(0),
        created_at: timestamp(created_at),
        content: None,
    }
}

pub fn with_tags(mut post: Post, tags: &[&str]) -> Post {
    post.tags = tags.iter().map(|tag| tag.to_string()).collect();
    post
}

/// `count` posts, one day apart, newest first, ids "1".."count".
pub fn daily_posts(count: usize) -> Vec<Post> {
    let start = timestamp("2024-03-31T12:00:00Z");
    (1..=count)
        .map(|index| {
            let created_at = start - time::Duration::days(index as i64);
            let mut post = post(
                &index.to_string(),
                &format!("Post {}", index),
                "tech",
                (index as i64 * 7) % 50,
                "2024-01-01T00:00:00Z",
            );
            post.created_at = created_at;
            post
        })
        .collect()
}

// ---------------------------------------------------------------------------
// TestApp: shared, lazily initialized once per test binary
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }

    /// Post ids of `items`, in order.
    pub fn item_ids(&self) -> Vec<String> {
        self.json()["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

static TEST_APP: OnceCell<TestApp> = OnceCell::const_new();

/// Get (or lazily create) the shared TestApp over the seed catalog.
pub async fn app() -> &'static TestApp {
    TEST_APP
        .get_or_init(|| async {
            let catalog = Catalog::seed().expect("seed catalog parses");
            TestApp::with_catalog(catalog)
        })
        .await
}

impl TestApp {
    pub fn with_catalog(catalog: Catalog) -> Self {
        let state = AppState::new(&AppConfig::default(), catalog);
        let router = curator::http::router(state.clone());
        TestApp { router, state }
    }

    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        if let Some(session) = session {
            builder = builder.header("x-session-id", session);
        }

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    // ------------------------------------------------------------------
    // Convenience HTTP helpers
    // ------------------------------------------------------------------
    pub async fn get(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, None, session).await
    }

    pub async fn post_json(&self, path: &str, body: Value, session: Option<&str>) -> TestResponse {
        self.request(Method::POST, path, Some(body), session).await
    }

    pub async fn post_empty(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.request(Method::POST, path, None, session).await
    }

    pub async fn put_json(&self, path: &str, body: Value, session: Option<&str>) -> TestResponse {
        self.request(Method::PUT, path, Some(body), session).await
    }

    // ------------------------------------------------------------------
    // Domain helpers
    // ------------------------------------------------------------------

    /// Starts a session and returns its id.
    pub async fn create_session(&self) -> String {
        let resp = self.post_empty("/sessions", None).await;
        assert_eq!(resp.status, StatusCode::CREATED, "session creation failed");
        resp.json()["session_id"]
            .as_str()
            .expect("session_id in response")
            .to_string()
    }
}
