use serde::{Deserialize, Serialize};

use crate::app::query::{self, FeedFilter, FeedOutcome, FeedQuery, SortMode};
use crate::domain::post::Post;
use crate::infra::catalog::Catalog;

#[derive(Clone)]
pub struct FeedService {
    catalog: Catalog,
    page_size: usize,
}

impl FeedService {
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        Self { catalog, page_size }
    }

    /// One page of the home feed. `featured` is the home default.
    pub fn home_page(&self, filter: FeedFilter, sort: Option<SortMode>, page: usize) -> FeedOutcome {
        let query = FeedQuery {
            filter,
            sort: sort.unwrap_or(SortMode::Featured),
            page,
            page_size: self.page_size,
        };
        let outcome = query::run(self.catalog.posts(), &query);
        tracing::debug!(
            category = %query.filter.category,
            search = %query.filter.search,
            sort = query.sort.as_str(),
            page,
            items = outcome.items().len(),
            has_more = outcome.has_more(),
            "home feed page"
        );
        outcome
    }

    /// One page of the trending feed. `popular` is the trending default.
    pub fn trending_page(&self, sort: Option<SortMode>, page: usize) -> FeedOutcome {
        let query = FeedQuery {
            filter: FeedFilter::default(),
            sort: sort.unwrap_or(SortMode::Popular),
            page,
            page_size: self.page_size,
        };
        query::run(self.catalog.posts(), &query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSelection {
    #[serde(flatten)]
    pub filter: FeedFilter,
    #[serde(default)]
    pub sort: SortMode,
}

/// Posts appended by one `load_more` call.
#[derive(Debug, Clone, Serialize)]
pub struct FeedIncrement {
    pub items: Vec<Post>,
    pub page: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedState<'a> {
    /// No selection has been made yet.
    Loading,
    NoResults { selection: &'a FeedSelection },
    Loaded {
        selection: &'a FeedSelection,
        heading: String,
        items: &'a [Post],
        page: usize,
        has_more: bool,
        reached_end: bool,
    },
}

/// Accumulates pages for one selection, the way an infinite-scroll list does.
#[derive(Debug, Clone)]
pub struct FeedCursor {
    page_size: usize,
    selection: Option<FeedSelection>,
    displayed: Vec<Post>,
    page: usize,
    has_more: bool,
    no_results: bool,
}

impl FeedCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            selection: None,
            displayed: Vec::new(),
            page: 0,
            has_more: false,
            no_results: false,
        }
    }

    /// Applies a selection. A different selection resets to page 1; the same
    /// selection leaves accumulated posts untouched. Returns whether it reset.
    pub fn select(&mut self, posts: &[Post], selection: FeedSelection) -> bool {
        if self.selection.as_ref() == Some(&selection) {
            return false;
        }

        let outcome = query::run(posts, &self.query_for(&selection, 1));
        self.selection = Some(selection);
        self.page = 1;
        self.no_results = outcome.is_no_results();
        self.has_more = outcome.has_more();
        self.displayed = match outcome {
            FeedOutcome::NoResults => Vec::new(),
            FeedOutcome::Page(page) => page.items,
        };
        true
    }

    /// Appends the next page. Past the end this is an empty increment and the
    /// accumulated posts are unchanged.
    pub fn load_more(&mut self, posts: &[Post]) -> FeedIncrement {
        let Some(selection) = self.selection.as_ref() else {
            return FeedIncrement {
                items: Vec::new(),
                page: 0,
                has_more: false,
            };
        };

        if !self.has_more {
            return FeedIncrement {
                items: Vec::new(),
                page: self.page,
                has_more: false,
            };
        }

        let next_page = self.page + 1;
        let outcome = query::run(posts, &self.query_for(selection, next_page));
        let items = outcome.items().to_vec();

        if items.is_empty() {
            self.has_more = false;
        } else {
            self.page = next_page;
            self.has_more = outcome.has_more();
            self.displayed.extend(items.iter().cloned());
        }

        FeedIncrement {
            items,
            page: self.page,
            has_more: self.has_more,
        }
    }

    pub fn state(&self) -> FeedState<'_> {
        let Some(selection) = self.selection.as_ref() else {
            return FeedState::Loading;
        };

        if self.no_results {
            return FeedState::NoResults { selection };
        }

        FeedState::Loaded {
            selection,
            heading: heading(selection),
            items: &self.displayed,
            page: self.page,
            has_more: self.has_more,
            reached_end: !self.has_more && self.displayed.len() > self.page_size,
        }
    }

    pub fn displayed(&self) -> &[Post] {
        &self.displayed
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    fn query_for(&self, selection: &FeedSelection, page: usize) -> FeedQuery {
        FeedQuery {
            filter: selection.filter.clone(),
            sort: selection.sort,
            page,
            page_size: self.page_size,
        }
    }
}

/// "Featured Posts", "Latest Posts", or "<Category> Posts" when filtered.
pub fn heading(selection: &FeedSelection) -> String {
    if selection.filter.category == query::ALL_CATEGORIES {
        format!("{} Posts", selection.sort.heading())
    } else {
        let category = crate::domain::post::Category::parse(&selection.filter.category);
        format!("{} Posts", category.display_name())
    }
}
