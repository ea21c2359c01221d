use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use crate::domain::post::Post;

const SEED_POSTS: &str = include_str!("../../data/posts.json");

/// Immutable post collection shared by every request for the life of the process.
#[derive(Clone)]
pub struct Catalog {
    posts: Arc<[Post]>,
}

impl Catalog {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let payload = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?;
                Self::from_json(&payload)
            }
            None => Self::seed(),
        }
    }

    pub fn seed() -> Result<Self> {
        Self::from_json(SEED_POSTS)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        let posts: Vec<Post> =
            serde_json::from_str(payload).context("failed to parse post catalog")?;
        Self::from_posts(posts)
    }

    pub fn from_posts(posts: Vec<Post>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if !seen.insert(post.id.as_str()) {
                return Err(anyhow!("duplicate post id in catalog: {}", post.id));
            }
        }
        tracing::info!(posts = posts.len(), "loaded post catalog");
        Ok(Self {
            posts: posts.into(),
        })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
