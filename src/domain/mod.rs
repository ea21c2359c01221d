pub mod engagement;
pub mod post;
pub mod preferences;
