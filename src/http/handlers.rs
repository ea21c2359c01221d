use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::app::engagement::{self, BookmarkOutcome, PostView, ShareOutcome, VoteOutcome};
use crate::app::feed::{self, FeedIncrement, FeedSelection, FeedService};
use crate::app::highlights::{self, Highlights};
use crate::app::leaderboard::{self, Leaderboard};
use crate::app::posts::{self, Submission, SubmissionRequest};
use crate::app::preferences::{WELCOME_MESSAGE, WELCOME_TITLE};
use crate::app::query::{FeedFilter, FeedOutcome, SortMode, ALL_CATEGORIES};
use crate::app::sessions::Session;
use crate::app::trending::{self, TrendingOverview, TrendingTab};
use crate::domain::engagement::{Comment, VoteDirection};
use crate::domain::post::{relative_time, Post, KNOWN_CATEGORIES};
use crate::domain::preferences::{Theme, Tip};
use crate::http::{AppError, SessionId};
use crate::AppState;

const MAX_COMMENT_LEN: usize = 1000;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    posts: usize,
    sessions: usize,
}

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

fn parse_page(page: Option<usize>) -> Result<usize, AppError> {
    match page.unwrap_or(1) {
        0 => Err(AppError::bad_request("page must be at least 1")),
        page => Ok(page),
    }
}

fn parse_sort(sort: Option<&str>) -> Result<Option<SortMode>, AppError> {
    match sort {
        None | Some("") => Ok(None),
        Some(value) => SortMode::parse(value)
            .map(Some)
            .ok_or_else(|| AppError::bad_request("sort must be one of featured, recent, popular")),
    }
}

/// `tag` deep links replace the search text.
fn build_filter(category: Option<String>, search: Option<String>, tag: Option<String>) -> FeedFilter {
    let category = category
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let search = tag
        .filter(|value| !value.is_empty())
        .or(search)
        .unwrap_or_default();
    FeedFilter::new(category, search)
}

fn in_session<T, F>(state: &AppState, session: SessionId, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut Session) -> T,
{
    state
        .sessions
        .with_session(session.0, f)
        .map_err(|err| {
            tracing::error!(error = ?err, session_id = %session.0, "failed to access session");
            AppError::internal("failed to access session")
        })?
        .ok_or_else(|| AppError::unauthorized("invalid session"))
}

fn find_post<'a>(state: &'a AppState, id: &str) -> Result<&'a Post, AppError> {
    state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::not_found("post not found"))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        posts: state.catalog.len(),
        sessions: state.sessions.len(),
    })
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub label: String,
    pub badge_tone: &'static str,
}

pub async fn list_categories() -> Json<ListResponse<CategoryResponse>> {
    let items = KNOWN_CATEGORIES
        .iter()
        .map(|category| CategoryResponse {
            id: category.as_str().to_string(),
            name: category.display_name(),
            label: category.label(),
            badge_tone: category.badge_tone(),
        })
        .collect();

    Json(ListResponse { items })
}

#[derive(Deserialize)]
pub struct FeedParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub heading: String,
    pub sort: SortMode,
    pub category: String,
    pub search: String,
    #[serde(flatten)]
    pub outcome: FeedOutcome,
}

pub async fn home_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let page = parse_page(params.page)?;
    let sort = parse_sort(params.sort.as_deref())?.unwrap_or(SortMode::Featured);
    let filter = build_filter(params.category, params.search, params.tag);

    let service = FeedService::new(state.catalog.clone(), state.feed_page_size);
    let outcome = service.home_page(filter.clone(), Some(sort), page);

    let selection = FeedSelection { filter, sort };
    Ok(Json(FeedResponse {
        heading: feed::heading(&selection),
        sort,
        category: selection.filter.category,
        search: selection.filter.search,
        outcome,
    }))
}

#[derive(Deserialize)]
pub struct TrendingParams {
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct TrendingResponse {
    pub tab: TrendingTab,
    #[serde(flatten)]
    pub outcome: FeedOutcome,
}

pub async fn trending_feed(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<TrendingResponse>, AppError> {
    let page = parse_page(params.page)?;
    let tab = match params.sort.as_deref() {
        None | Some("") => TrendingTab::default(),
        Some(value) => TrendingTab::parse(value).ok_or_else(|| {
            AppError::bad_request("sort must be one of popular, recent, discussed")
        })?,
    };

    let outcome = match tab {
        TrendingTab::Discussed => {
            trending::tab_page(state.catalog.posts(), tab, page, state.feed_page_size)
        }
        TrendingTab::Popular | TrendingTab::Recent => {
            let sort = if tab == TrendingTab::Recent {
                SortMode::Recent
            } else {
                SortMode::Popular
            };
            FeedService::new(state.catalog.clone(), state.feed_page_size)
                .trending_page(Some(sort), page)
        }
    };

    Ok(Json(TrendingResponse { tab, outcome }))
}

pub async fn trending_overview(State(state): State<AppState>) -> Json<TrendingOverview> {
    Json(trending::overview(state.catalog.posts(), state.trending_limit))
}

pub async fn get_leaderboard(State(state): State<AppState>) -> Json<Leaderboard> {
    Json(leaderboard::build(state.catalog.posts()))
}

pub async fn get_sidebar(State(state): State<AppState>) -> Json<Highlights> {
    Json(highlights::build(state.catalog.posts()))
}

#[derive(Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: uuid::Uuid,
    pub first_visit: bool,
    pub welcome: Option<Notice>,
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let (session_id, first_visit) = state.sessions.create().map_err(|err| {
        tracing::error!(error = ?err, "failed to create session");
        AppError::internal("failed to create session")
    })?;

    let welcome = first_visit.then_some(Notice {
        title: WELCOME_TITLE,
        message: WELCOME_MESSAGE,
    });

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            first_visit,
            welcome,
        }),
    ))
}

pub async fn session_feed(
    session: SessionId,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let value = in_session(&state, session, |session| {
        serde_json::to_value(session.feed.state())
    })?
    .map_err(|err| {
        tracing::error!(error = ?err, "failed to encode feed state");
        AppError::internal("failed to encode feed state")
    })?;

    Ok(Json(value))
}

#[derive(Deserialize)]
pub struct SelectFeedRequest {
    pub category: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
}

pub async fn select_feed(
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<SelectFeedRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sort = parse_sort(payload.sort.as_deref())?.unwrap_or_default();
    let selection = FeedSelection {
        filter: build_filter(payload.category, payload.search, payload.tag),
        sort,
    };

    let posts = state.catalog.posts();
    let value = in_session(&state, session, |session| {
        let reset = session.feed.select(posts, selection);
        let mut value = serde_json::to_value(session.feed.state())?;
        if let Some(object) = value.as_object_mut() {
            object.insert("reset".to_string(), serde_json::Value::Bool(reset));
        }
        Ok::<_, serde_json::Error>(value)
    })?
    .map_err(|err| {
        tracing::error!(error = ?err, "failed to encode feed state");
        AppError::internal("failed to encode feed state")
    })?;

    Ok(Json(value))
}

pub async fn load_more_feed(
    session: SessionId,
    State(state): State<AppState>,
) -> Result<Json<FeedIncrement>, AppError> {
    let posts = state.catalog.posts();
    let increment = in_session(&state, session, |session| session.feed.load_more(posts))?;
    tracing::debug!(
        session_id = %session.0,
        page = increment.page,
        items = increment.items.len(),
        has_more = increment.has_more,
        "loaded more posts"
    );
    Ok(Json(increment))
}

#[derive(Deserialize)]
pub struct TipRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct TipResponse {
    pub tip: Option<Tip>,
}

pub async fn show_tip(
    Path(id): Path<String>,
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<TipRequest>,
) -> Result<Json<TipResponse>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::bad_request("tip id cannot be empty"));
    }

    let tip = in_session(&state, session, |session| {
        session.preferences.show_tip(&id, &payload.message)
    })?;

    Ok(Json(TipResponse { tip }))
}

pub async fn dismiss_onboarding(
    session: SessionId,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    in_session(&state, session, |session| session.preferences.dismiss())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

pub async fn get_theme(
    session: SessionId,
    State(state): State<AppState>,
) -> Result<Json<ThemeBody>, AppError> {
    let theme = in_session(&state, session, |session| session.preferences.theme())?;
    Ok(Json(ThemeBody { theme }))
}

pub async fn set_theme(
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    in_session(&state, session, |session| {
        session.preferences.set_theme(payload.theme)
    })?;
    Ok(Json(payload))
}

#[derive(Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub view: PostView,
    pub body: String,
    pub created_ago: String,
}

pub async fn get_post(
    Path(id): Path<String>,
    session: Option<SessionId>,
    State(state): State<AppState>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let post = find_post(&state, &id)?;

    let view = match session {
        Some(session) => in_session(&state, session, |session| session.engagement.view(post))?,
        None => engagement::seed_view(post),
    };

    Ok(Json(PostDetailResponse {
        body: posts::detail_body(post),
        created_ago: relative_time(post.created_at, OffsetDateTime::now_utc()),
        view,
    }))
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

pub async fn vote_post(
    Path(id): Path<String>,
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteOutcome>, AppError> {
    let post = find_post(&state, &id)?;
    let outcome = in_session(&state, session, |session| {
        session.engagement.vote(post, payload.direction)
    })?;
    tracing::debug!(post_id = %id, votes = outcome.votes, "post vote");
    Ok(Json(outcome))
}

pub async fn bookmark_post(
    Path(id): Path<String>,
    session: SessionId,
    State(state): State<AppState>,
) -> Result<Json<BookmarkOutcome>, AppError> {
    let post = find_post(&state, &id)?;
    let outcome = in_session(&state, session, |session| {
        session.engagement.toggle_bookmark(post)
    })?;
    Ok(Json(outcome))
}

pub async fn share_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShareOutcome>, AppError> {
    let post = find_post(&state, &id)?;
    Ok(Json(engagement::share(post)))
}

pub async fn list_post_comments(
    Path(id): Path<String>,
    session: Option<SessionId>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Comment>>, AppError> {
    let post = find_post(&state, &id)?;
    let items = match session {
        Some(session) => in_session(&state, session, |session| session.engagement.comments(post))?,
        None => post.comments.thread().to_vec(),
    };
    Ok(Json(ListResponse { items }))
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

pub async fn comment_post(
    Path(id): Path<String>,
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("comment content cannot be empty"));
    }
    if payload.content.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::bad_request("comment content exceeds 1000 characters"));
    }

    let post = find_post(&state, &id)?;
    let now = OffsetDateTime::now_utc();
    let comment = in_session(&state, session, |session| {
        session.engagement.add_comment(post, payload.content, now)
    })?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn vote_comment(
    Path((id, comment_id)): Path<(String, String)>,
    session: SessionId,
    State(state): State<AppState>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<Comment>, AppError> {
    let post = find_post(&state, &id)?;
    let comment = in_session(&state, session, |session| {
        session
            .engagement
            .vote_comment(post, &comment_id, payload.direction)
    })?;

    comment
        .map(Json)
        .ok_or_else(|| AppError::not_found("comment not found"))
}

#[derive(Serialize)]
pub struct SubmissionResponse {
    pub title: &'static str,
    pub message: &'static str,
    pub submission: Submission,
}

pub async fn submit_post(
    Json(payload): Json<SubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let submission = posts::validate_submission(payload)
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    tracing::info!(
        title = %submission.title,
        category = submission.category.as_str(),
        "submission accepted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmissionResponse {
            title: "Content submitted successfully!",
            message: "Thank you for your contribution.",
            submission,
        }),
    ))
}
