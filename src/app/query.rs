//! Feed query engine: filter, sort and paginate a post collection.
//!
//! Every function here is pure. The same collection and query always produce
//! the same page, so the home feed and the trending page can both call in
//! from repeated "load more" triggers without sharing any state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::post::Post;

pub const ALL_CATEGORIES: &str = "all";
pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Featured,
    Recent,
    Popular,
}

impl SortMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "featured" => Some(Self::Featured),
            "recent" => Some(Self::Recent),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Recent => "recent",
            Self::Popular => "popular",
        }
    }

    /// Heading used when no category is selected.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Recent => "Latest",
            Self::Popular => "Popular",
        }
    }
}

/// Category and search selection. Changing either resets pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFilter {
    pub category: String,
    pub search: String,
}

impl Default for FeedFilter {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl FeedFilter {
    pub fn new(category: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        if self.category != ALL_CATEGORIES && post.category.as_str() != self.category {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        let query = self.search.to_lowercase();
        post.title.to_lowercase().contains(&query)
            || post.description.to_lowercase().contains(&query)
            || post
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(flatten)]
    pub filter: FeedFilter,
    pub sort: SortMode,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            filter: FeedFilter::default(),
            sort: SortMode::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One requested page of a non-empty filtered feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub items: Vec<Post>,
    pub page: usize,
    pub has_more: bool,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedOutcome {
    /// The filter matched nothing. Terminal; there are no pages.
    NoResults,
    Page(FeedPage),
}

impl FeedOutcome {
    pub fn items(&self) -> &[Post] {
        match self {
            Self::NoResults => &[],
            Self::Page(page) => &page.items,
        }
    }

    pub fn has_more(&self) -> bool {
        match self {
            Self::NoResults => false,
            Self::Page(page) => page.has_more,
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, Self::NoResults)
    }
}

pub fn filter_posts<'a>(posts: &'a [Post], filter: &FeedFilter) -> Vec<&'a Post> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// Featured blend. The epoch-millisecond term dominates the upvote term.
pub fn featured_score(post: &Post) -> f64 {
    post.upvotes as f64 * 0.7 + post.created_at_millis() as f64 * 0.3
}

pub fn compare(sort: SortMode, a: &Post, b: &Post) -> Ordering {
    match sort {
        SortMode::Recent => b.created_at.cmp(&a.created_at),
        SortMode::Popular => b.upvotes.cmp(&a.upvotes),
        SortMode::Featured => featured_score(b).total_cmp(&featured_score(a)),
    }
}

/// Stable sort; ties keep their filtered order.
pub fn sort_posts(posts: &mut [&Post], sort: SortMode) {
    posts.sort_by(|a, b| compare(sort, a, b));
}

/// Filter and sort without paginating.
pub fn ranked<'a>(posts: &'a [Post], filter: &FeedFilter, sort: SortMode) -> Vec<&'a Post> {
    let mut filtered = filter_posts(posts, filter);
    sort_posts(&mut filtered, sort);
    filtered
}

pub fn run(posts: &[Post], query: &FeedQuery) -> FeedOutcome {
    let ranked = ranked(posts, &query.filter, query.sort);
    paginate(&ranked, query.page, query.page_size)
}

/// Slice an already ranked sequence. Out-of-range pages come back empty with
/// `has_more == false`.
pub fn paginate(ranked: &[&Post], page: usize, page_size: usize) -> FeedOutcome {
    if ranked.is_empty() {
        return FeedOutcome::NoResults;
    }

    let total = ranked.len();
    let page = match page_bounds(page, page_size) {
        Some((start, end)) if start < total => FeedPage {
            items: ranked[start..end.min(total)]
                .iter()
                .map(|post| (*post).clone())
                .collect(),
            page,
            has_more: end < total,
            total,
        },
        _ => FeedPage {
            items: Vec::new(),
            page,
            has_more: false,
            total,
        },
    };

    FeedOutcome::Page(page)
}

/// `[start, end)` for a 1-indexed page. Page 0 and size 0 have no bounds.
fn page_bounds(page: usize, page_size: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }
    let start = (page - 1).checked_mul(page_size)?;
    let end = start.checked_add(page_size)?;
    Some((start, end))
}
