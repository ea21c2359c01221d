use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::engagement::{Comment, VoteDirection};
use crate::domain::post::{Author, Post};

const MILESTONE_EVERY: i64 = 50;
const LOCAL_AUTHOR: &str = "You";
const LOCAL_AVATAR: &str = "/placeholder.svg?height=40&width=40";

/// What one session has done to one post. Seeded from the catalog on first
/// touch and never written back.
#[derive(Debug, Clone)]
struct PostInteraction {
    votes: i64,
    vote: Option<VoteDirection>,
    bookmarked: bool,
    comments: Vec<Comment>,
}

impl PostInteraction {
    fn seeded(post: &Post) -> Self {
        Self {
            votes: post.upvotes,
            vote: None,
            bookmarked: false,
            comments: post.comments.thread().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteOutcome {
    pub votes: i64,
    pub user_vote: Option<VoteDirection>,
    pub message: Option<String>,
    pub milestone: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookmarkOutcome {
    pub bookmarked: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareOutcome {
    pub link: String,
    pub message: &'static str,
}

/// Post as seen by one session.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub votes: i64,
    pub user_vote: Option<VoteDirection>,
    pub bookmarked: bool,
    pub thread: Vec<Comment>,
}

#[derive(Debug, Clone, Default)]
pub struct EngagementState {
    posts: HashMap<String, PostInteraction>,
}

impl EngagementState {
    pub fn new() -> Self {
        Self::default()
    }

    fn interaction(&mut self, post: &Post) -> &mut PostInteraction {
        self.posts
            .entry(post.id.clone())
            .or_insert_with(|| PostInteraction::seeded(post))
    }

    /// Same direction twice clears the vote; switching direction moves by two.
    pub fn vote(&mut self, post: &Post, direction: VoteDirection) -> VoteOutcome {
        let interaction = self.interaction(post);

        if interaction.vote == Some(direction) {
            interaction.votes -= direction.sign();
            interaction.vote = None;
            return VoteOutcome {
                votes: interaction.votes,
                user_vote: None,
                message: None,
                milestone: false,
            };
        }

        let change = if interaction.vote.is_some() { 2 } else { 1 };
        interaction.votes += direction.sign() * change;
        interaction.vote = Some(direction);

        let message = match direction {
            VoteDirection::Up => "Upvoted!",
            VoteDirection::Down => "Downvoted",
        };

        VoteOutcome {
            votes: interaction.votes,
            user_vote: Some(direction),
            message: Some(message.to_string()),
            milestone: direction == VoteDirection::Up && interaction.votes % MILESTONE_EVERY == 0,
        }
    }

    pub fn toggle_bookmark(&mut self, post: &Post) -> BookmarkOutcome {
        let interaction = self.interaction(post);
        interaction.bookmarked = !interaction.bookmarked;

        BookmarkOutcome {
            bookmarked: interaction.bookmarked,
            message: if interaction.bookmarked {
                "Added to bookmarks"
            } else {
                "Removed from bookmarks"
            },
        }
    }

    pub fn comments(&mut self, post: &Post) -> Vec<Comment> {
        self.interaction(post).comments.clone()
    }

    /// Prepends a comment authored by the local user.
    pub fn add_comment(&mut self, post: &Post, content: String, now: OffsetDateTime) -> Comment {
        let interaction = self.interaction(post);
        let comment = Comment {
            id: format!("c{}", interaction.comments.len() + 1),
            content,
            author: Author {
                name: LOCAL_AUTHOR.to_string(),
                avatar: LOCAL_AVATAR.to_string(),
            },
            created_at: now,
            upvotes: 0,
        };
        interaction.comments.insert(0, comment.clone());
        comment
    }

    pub fn vote_comment(
        &mut self,
        post: &Post,
        comment_id: &str,
        direction: VoteDirection,
    ) -> Option<Comment> {
        let comment = self
            .interaction(post)
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)?;
        comment.upvotes += direction.sign();
        Some(comment.clone())
    }

    pub fn view(&mut self, post: &Post) -> PostView {
        let interaction = self.interaction(post).clone();
        PostView {
            post: post.clone(),
            votes: interaction.votes,
            user_vote: interaction.vote,
            bookmarked: interaction.bookmarked,
            thread: interaction.comments,
        }
    }
}

/// View of a post with no session overlay.
pub fn seed_view(post: &Post) -> PostView {
    PostView {
        post: post.clone(),
        votes: post.upvotes,
        user_vote: None,
        bookmarked: false,
        thread: post.comments.thread().to_vec(),
    }
}

pub fn share(post: &Post) -> ShareOutcome {
    ShareOutcome {
        link: format!("/post/{}", post.id),
        message: "Link copied!",
    }
}
