//! Session Tests
//!
//! Onboarding, theme preferences, submissions and catalog loading.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, post, timestamp, TestApp};
use curator::app::posts::{self, SubmissionError, SubmissionRequest};
use curator::app::preferences::Preferences;
use curator::app::sessions::SessionStore;
use curator::domain::post::{relative_time, Category};
use curator::domain::preferences::Theme;
use curator::infra::catalog::Catalog;
use curator::infra::store::{MemoryStore, PreferenceStore};

fn submission(title: &str, link: &str, category: &str, description: &str) -> SubmissionRequest {
    SubmissionRequest {
        title: title.to_string(),
        link: link.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        tags: None,
    }
}

// ===========================================================================
// Preferences
// ===========================================================================

#[test]
fn first_visit_is_detected_once_per_store() {
    let preferences = Preferences::init(MemoryStore::new());
    assert!(preferences.is_first_visit());

    let returning = Preferences::init(preferences.into_store());
    assert!(!returning.is_first_visit());
}

#[test]
fn tips_show_once_and_only_on_first_visit() {
    let mut preferences = Preferences::init(MemoryStore::new());

    let tip = preferences.show_tip("search", "Use the search bar to find posts.");
    assert_eq!(tip.as_ref().map(|tip| tip.id.as_str()), Some("search"));
    assert!(preferences.show_tip("search", "again").is_none());
    assert!(preferences.show_tip("vote", "Upvote what you like.").is_some());

    // Seen tips survive a reload of the same store.
    let store = preferences.into_store();
    assert!(store.get("curator:tips").is_some());
}

#[test]
fn dismissing_onboarding_hides_remaining_tips() {
    let mut preferences = Preferences::init(MemoryStore::new());
    preferences.dismiss();

    assert!(!preferences.is_first_visit());
    assert!(preferences.show_tip("search", "hidden").is_none());
}

#[test]
fn unreadable_tip_state_is_discarded() {
    let mut store = MemoryStore::new();
    store.set("curator:tips", "not json".to_string());

    let mut preferences = Preferences::init(store);
    assert!(preferences.show_tip("search", "shown").is_some());
}

#[test]
fn theme_defaults_to_system_and_persists() {
    let mut preferences = Preferences::init(MemoryStore::new());
    assert_eq!(preferences.theme(), Theme::System);

    preferences.set_theme(Theme::Dark);
    assert_eq!(preferences.theme(), Theme::Dark);

    let store = preferences.into_store();
    assert_eq!(store.get("curator:theme").as_deref(), Some("dark"));
}

#[test]
fn session_store_reuses_an_existing_preference_store() {
    let sessions = SessionStore::new(6);

    let (fresh, first_visit) = sessions.create().expect("session created");
    assert!(first_visit);
    assert!(sessions.exists(fresh).expect("lookup"));

    let mut store = MemoryStore::new();
    store.set("curator:visited", "true".to_string());
    let (_, first_visit) = sessions
        .create_with_store(store)
        .expect("session created");
    assert!(!first_visit);
    assert_eq!(sessions.len(), 2);
}

// ===========================================================================
// Onboarding and theme over HTTP
// ===========================================================================

#[tokio::test]
async fn new_sessions_get_a_welcome() {
    let app = app().await;

    let resp = app.post_empty("/sessions", None).await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let body = resp.json();
    assert_eq!(body["first_visit"], true);
    assert_eq!(body["welcome"]["title"], "Welcome to Curator!");
    assert!(body["session_id"].as_str().is_some());
}

#[tokio::test]
async fn tips_over_http() {
    let app = app().await;
    let session = app.create_session().await;

    let resp = app
        .post_json(
            "/session/tips/sort",
            json!({ "message": "Switch between featured, latest and popular." }),
            Some(&session),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["tip"]["id"], "sort");
    assert_eq!(resp.json()["tip"]["title"], "Tip");

    let resp = app
        .post_json("/session/tips/sort", json!({ "message": "again" }), Some(&session))
        .await;
    assert!(resp.json()["tip"].is_null());

    let resp = app
        .post_empty("/session/onboarding/dismiss", Some(&session))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app
        .post_json("/session/tips/share", json!({ "message": "later" }), Some(&session))
        .await;
    assert!(resp.json()["tip"].is_null());
}

#[tokio::test]
async fn theme_over_http() {
    let app = app().await;
    let session = app.create_session().await;

    let resp = app.get("/session/theme", Some(&session)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["theme"], "system");

    let resp = app
        .put_json("/session/theme", json!({ "theme": "light" }), Some(&session))
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.get("/session/theme", Some(&session)).await;
    assert_eq!(resp.json()["theme"], "light");

    let resp = app
        .put_json("/session/theme", json!({ "theme": "sepia" }), Some(&session))
        .await;
    assert!(resp.status.is_client_error());
}

// ===========================================================================
// Submissions
// ===========================================================================

#[test]
fn submission_validation_order_and_messages() {
    let long_enough = "A description that is long enough.";

    let cases = [
        (
            submission("Hey", "https://example.com", "tech", long_enough),
            SubmissionError::TitleTooShort,
        ),
        (
            submission(&"t".repeat(101), "https://example.com", "tech", long_enough),
            SubmissionError::TitleTooLong,
        ),
        (
            submission("Valid title", "example dot com", "tech", long_enough),
            SubmissionError::InvalidLink,
        ),
        (
            submission("Valid title", "https://example.com", "", long_enough),
            SubmissionError::MissingCategory,
        ),
        (
            submission("Valid title", "https://example.com", "podcasts", long_enough),
            SubmissionError::MissingCategory,
        ),
        (
            submission("Valid title", "https://example.com", "tech", "Too short"),
            SubmissionError::DescriptionTooShort,
        ),
        (
            submission("Valid title", "https://example.com", "tech", &"d".repeat(501)),
            SubmissionError::DescriptionTooLong,
        ),
    ];

    for (request, expected) in cases {
        assert_eq!(posts::validate_submission(request).err(), Some(expected));
    }

    assert_eq!(
        SubmissionError::InvalidLink.to_string(),
        "Please enter a valid URL."
    );
}

#[test]
fn submission_tags_are_split_and_trimmed() {
    let mut request = submission(
        "Valid title",
        "https://example.com/post",
        "design",
        "A description that is long enough.",
    );
    request.tags = Some(" ui, , color ,layout".to_string());

    let accepted = posts::validate_submission(request).expect("valid submission");
    assert_eq!(accepted.category, Category::Design);
    assert_eq!(accepted.tags, vec!["ui", "color", "layout"]);
}

#[tokio::test]
async fn submissions_over_http() {
    let app = app().await;

    let resp = app
        .post_json(
            "/submissions",
            json!({
                "title": "Async Rust in Practice",
                "link": "https://example.com/async",
                "category": "tech",
                "description": "Notes from a year of running tokio services.",
                "tags": "rust, async"
            }),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::ACCEPTED);
    assert_eq!(resp.json()["title"], "Content submitted successfully!");
    assert_eq!(resp.json()["submission"]["tags"], json!(["rust", "async"]));

    // Acknowledged only; the catalog does not grow.
    let resp = app.get("/health", None).await;
    assert_eq!(resp.json()["posts"], 12);

    let resp = app
        .post_json("/submissions", json!({ "title": "Hi" }), None)
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.error_message(),
        "Title must be at least 5 characters."
    );
}

// ===========================================================================
// Catalog and display helpers
// ===========================================================================

#[test]
fn seed_catalog_loads() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.get("1").map(|post| post.comment_count()), Some(2));
    assert_eq!(catalog.get("6").map(|post| post.comment_count()), Some(52));
    assert!(catalog.get("missing").is_none());
}

#[test]
fn catalog_rejects_duplicate_ids() {
    let posts = vec![
        post("1", "One", "tech", 1, "2024-03-01T00:00:00Z"),
        post("1", "Again", "tech", 2, "2024-03-02T00:00:00Z"),
    ];
    assert!(Catalog::from_posts(posts).is_err());
    assert!(Catalog::from_json("{ not json").is_err());
}

#[tokio::test]
async fn custom_catalog_drives_the_feed() {
    let catalog = Catalog::from_posts(vec![
        post("a", "Alpha", "podcasts", 5, "2024-03-01T00:00:00Z"),
        post("b", "Beta", "tech", 9, "2024-03-02T00:00:00Z"),
    ])
    .expect("catalog");
    let app = TestApp::with_catalog(catalog);

    let resp = app.get("/feed?category=podcasts", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["heading"], "Podcasts Posts");
    assert_eq!(resp.item_ids(), vec!["a"]);
}

#[test]
fn unknown_categories_round_trip_as_plain_strings() {
    let category = Category::parse("podcasts");
    assert_eq!(category.as_str(), "podcasts");
    assert_eq!(category.badge_tone(), "gray");
    assert!(Category::from_known("podcasts").is_none());
    assert_eq!(Category::Health.label(), "Health & Wellness");
}

#[test]
fn relative_time_phrases() {
    let now = timestamp("2024-03-15T12:00:00Z");

    assert_eq!(
        relative_time(timestamp("2024-03-15T11:59:50Z"), now),
        "less than a minute ago"
    );
    assert_eq!(
        relative_time(timestamp("2024-03-15T11:55:00Z"), now),
        "5 minutes ago"
    );
    assert_eq!(
        relative_time(timestamp("2024-03-15T09:00:00Z"), now),
        "about 3 hours ago"
    );
    assert_eq!(
        relative_time(timestamp("2024-03-12T12:00:00Z"), now),
        "3 days ago"
    );
    assert_eq!(
        relative_time(timestamp("2024-03-15T12:05:00Z"), now),
        "in 5 minutes"
    );
}
