use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::post::{Category, Post};

const TITLE_MIN: usize = 5;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 20;
const DESCRIPTION_MAX: usize = 500;

/// Body for the detail view; falls back to the description.
pub fn detail_body(post: &Post) -> String {
    match &post.content {
        Some(content) => content.clone(),
        None => format!(
            "<p>{}</p>\n<p>This is an expanded view of the post. The full content would be displayed here, including any formatting, images, or other media that might be part of the article.</p>\n<p>Users can read the complete article and engage with it through comments and voting.</p>",
            post.description
        ),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<String>,
}

/// A validated submission. Acknowledged only; never added to the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub title: String,
    pub link: String,
    pub category: Category,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    TitleTooShort,
    TitleTooLong,
    InvalidLink,
    MissingCategory,
    DescriptionTooShort,
    DescriptionTooLong,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::TitleTooShort => "Title must be at least 5 characters.",
            Self::TitleTooLong => "Title must not exceed 100 characters.",
            Self::InvalidLink => "Please enter a valid URL.",
            Self::MissingCategory => "Please select a category.",
            Self::DescriptionTooShort => "Description must be at least 20 characters.",
            Self::DescriptionTooLong => "Description must not exceed 500 characters.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for SubmissionError {}

pub fn validate_submission(request: SubmissionRequest) -> Result<Submission, SubmissionError> {
    let title_len = request.title.chars().count();
    if title_len < TITLE_MIN {
        return Err(SubmissionError::TitleTooShort);
    }
    if title_len > TITLE_MAX {
        return Err(SubmissionError::TitleTooLong);
    }

    let link = Url::parse(request.link.trim()).map_err(|_| SubmissionError::InvalidLink)?;

    let category =
        Category::from_known(request.category.trim()).ok_or(SubmissionError::MissingCategory)?;

    let description_len = request.description.chars().count();
    if description_len < DESCRIPTION_MIN {
        return Err(SubmissionError::DescriptionTooShort);
    }
    if description_len > DESCRIPTION_MAX {
        return Err(SubmissionError::DescriptionTooLong);
    }

    let tags = request
        .tags
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Submission {
        title: request.title,
        link: link.to_string(),
        category,
        description: request.description,
        tags,
    })
}
