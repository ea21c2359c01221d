use std::collections::HashMap;

use serde::Serialize;

use crate::domain::post::{Category, Post};

const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ContributorStats {
    pub name: String,
    pub avatar: String,
    pub posts: u64,
    pub upvotes: i64,
    pub comments: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub id: String,
    pub name: String,
    pub badge_tone: &'static str,
    pub posts: u64,
    pub upvotes: i64,
    pub average_upvotes: i64,
}

impl CategoryStats {
    fn average(&self) -> f64 {
        if self.posts == 0 {
            0.0
        } else {
            self.upvotes as f64 / self.posts as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedContributor {
    pub rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    #[serde(flatten)]
    pub stats: ContributorStats,
    /// Value relative to the leader of the same ranking, 0-100.
    pub share_of_leader: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCategory {
    pub rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    #[serde(flatten)]
    pub stats: CategoryStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub by_upvotes: Vec<RankedContributor>,
    pub by_posts: Vec<RankedContributor>,
    pub by_comments: Vec<RankedContributor>,
    pub top_categories: Vec<RankedCategory>,
}

/// Per-author totals in first-seen order.
pub fn contributors(posts: &[Post]) -> Vec<ContributorStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<ContributorStats> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.author.name.as_str()).or_insert_with(|| {
            stats.push(ContributorStats {
                name: post.author.name.clone(),
                avatar: post.author.avatar.clone(),
                posts: 0,
                upvotes: 0,
                comments: 0,
            });
            stats.len() - 1
        });
        let entry = &mut stats[slot];
        entry.posts += 1;
        entry.upvotes += post.upvotes;
        entry.comments += post.comment_count() as u64;
    }

    stats
}

/// Per-category totals in first-seen order.
pub fn categories(posts: &[Post]) -> Vec<CategoryStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CategoryStats> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.category.as_str()).or_insert_with(|| {
            stats.push(category_entry(&post.category));
            stats.len() - 1
        });
        stats[slot].posts += 1;
        stats[slot].upvotes += post.upvotes;
    }

    for entry in &mut stats {
        entry.average_upvotes = entry.average().round() as i64;
    }

    stats
}

fn category_entry(category: &Category) -> CategoryStats {
    CategoryStats {
        id: category.as_str().to_string(),
        name: category.display_name(),
        badge_tone: category.badge_tone(),
        posts: 0,
        upvotes: 0,
        average_upvotes: 0,
    }
}

pub fn top_contributors_by_upvotes(posts: &[Post], limit: usize) -> Vec<ContributorStats> {
    let mut stats = contributors(posts);
    stats.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    stats.truncate(limit);
    stats
}

/// Categories ordered by average upvotes per post.
pub fn trending_categories(posts: &[Post], limit: usize) -> Vec<CategoryStats> {
    let mut stats = categories(posts);
    stats.sort_by(|a, b| b.average().total_cmp(&a.average()));
    stats.truncate(limit);
    stats
}

pub fn build(posts: &[Post]) -> Leaderboard {
    let stats = contributors(posts);

    let by_upvotes = rank_contributors(&stats, |entry| entry.upvotes as f64);
    let by_posts = rank_contributors(&stats, |entry| entry.posts as f64);
    let by_comments = rank_contributors(&stats, |entry| entry.comments as f64);

    let mut category_stats = categories(posts);
    category_stats.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    let top_categories = category_stats
        .into_iter()
        .enumerate()
        .map(|(index, stats)| RankedCategory {
            rank: index + 1,
            medal: Medal::for_rank(index + 1),
            stats,
        })
        .collect();

    Leaderboard {
        by_upvotes,
        by_posts,
        by_comments,
        top_categories,
    }
}

fn rank_contributors<F>(stats: &[ContributorStats], value: F) -> Vec<RankedContributor>
where
    F: Fn(&ContributorStats) -> f64,
{
    let mut ordered: Vec<&ContributorStats> = stats.iter().collect();
    ordered.sort_by(|a, b| value(*b).total_cmp(&value(*a)));
    ordered.truncate(LEADERBOARD_SIZE);

    let leader = ordered.first().map(|entry| value(*entry)).unwrap_or(0.0);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedContributor {
            rank: index + 1,
            medal: Medal::for_rank(index + 1),
            share_of_leader: if leader > 0.0 {
                value(entry) / leader * 100.0
            } else {
                0.0
            },
            stats: entry.clone(),
        })
        .collect()
}
