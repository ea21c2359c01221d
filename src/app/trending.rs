use serde::{Deserialize, Serialize};

use crate::app::leaderboard::{self, CategoryStats, ContributorStats};
use crate::app::query::{self, FeedFilter, FeedOutcome, SortMode};
use crate::domain::post::Post;

const TOP_CONTRIBUTORS: usize = 5;
const TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingTab {
    #[default]
    Popular,
    Recent,
    Discussed,
}

impl TrendingTab {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "popular" => Some(Self::Popular),
            "recent" => Some(Self::Recent),
            "discussed" => Some(Self::Discussed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingPost {
    pub rank: usize,
    #[serde(flatten)]
    pub post: Post,
    pub comment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingOverview {
    pub popular: Vec<TrendingPost>,
    pub recent: Vec<TrendingPost>,
    pub discussed: Vec<TrendingPost>,
    pub top_contributors: Vec<ContributorStats>,
    pub trending_categories: Vec<CategoryStats>,
}

pub fn ranked_tab(posts: &[Post], tab: TrendingTab) -> Vec<&Post> {
    match tab {
        TrendingTab::Popular => query::ranked(posts, &FeedFilter::default(), SortMode::Popular),
        TrendingTab::Recent => query::ranked(posts, &FeedFilter::default(), SortMode::Recent),
        TrendingTab::Discussed => {
            let mut ranked: Vec<&Post> = posts.iter().collect();
            ranked.sort_by(|a, b| b.comment_count().cmp(&a.comment_count()));
            ranked
        }
    }
}

pub fn tab_page(posts: &[Post], tab: TrendingTab, page: usize, page_size: usize) -> FeedOutcome {
    query::paginate(&ranked_tab(posts, tab), page, page_size)
}

pub fn top_of_tab(posts: &[Post], tab: TrendingTab, limit: usize) -> Vec<TrendingPost> {
    ranked_tab(posts, tab)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, post)| TrendingPost {
            rank: index + 1,
            comment_count: post.comment_count(),
            post: post.clone(),
        })
        .collect()
}

pub fn overview(posts: &[Post], limit: usize) -> TrendingOverview {
    TrendingOverview {
        popular: top_of_tab(posts, TrendingTab::Popular, limit),
        recent: top_of_tab(posts, TrendingTab::Recent, limit),
        discussed: top_of_tab(posts, TrendingTab::Discussed, limit),
        top_contributors: leaderboard::top_contributors_by_upvotes(posts, TOP_CONTRIBUTORS),
        trending_categories: leaderboard::trending_categories(posts, TOP_CATEGORIES),
    }
}
