use std::collections::HashMap;

use serde::Serialize;

use crate::app::leaderboard;
use crate::app::query::{self, FeedFilter, SortMode};
use crate::domain::post::Post;

const TRENDING_POSTS: usize = 3;
const POPULAR_TAGS: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub badge_tone: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlights {
    pub trending: Vec<Post>,
    pub categories: Vec<CategoryCount>,
    pub popular_tags: Vec<TagCount>,
}

pub fn build(posts: &[Post]) -> Highlights {
    let trending = query::ranked(posts, &FeedFilter::default(), SortMode::Popular)
        .into_iter()
        .take(TRENDING_POSTS)
        .cloned()
        .collect();

    let categories = leaderboard::categories(posts)
        .into_iter()
        .map(|stats| CategoryCount {
            id: stats.id,
            name: stats.name,
            badge_tone: stats.badge_tone,
            count: stats.posts,
        })
        .collect();

    Highlights {
        trending,
        categories,
        popular_tags: popular_tags(posts, POPULAR_TAGS),
    }
}

/// Most used tags; ties keep first-seen order.
pub fn popular_tags(posts: &[Post], limit: usize) -> Vec<TagCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();

    for tag in posts.iter().flat_map(|post| post.tags.iter()) {
        match index.get(tag.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(tag.as_str(), counts.len());
                counts.push(TagCount {
                    name: tag.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
