pub mod engagement;
pub mod feed;
pub mod highlights;
pub mod leaderboard;
pub mod posts;
pub mod preferences;
pub mod query;
pub mod sessions;
pub mod trending;
