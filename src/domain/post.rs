use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::domain::engagement::Comment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Author,
    pub upvotes: i64,
    #[serde(default)]
    pub comments: CommentsSummary,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// Epoch milliseconds of `created_at`, as used by the featured ranking.
    pub fn created_at_millis(&self) -> i64 {
        (self.created_at.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn comment_count(&self) -> usize {
        self.comments.count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

/// Post comments arrive either as a bare count or as a full thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentsSummary {
    Count(usize),
    Thread(Vec<Comment>),
}

impl Default for CommentsSummary {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl CommentsSummary {
    pub fn count(&self) -> usize {
        match self {
            Self::Count(count) => *count,
            Self::Thread(comments) => comments.len(),
        }
    }

    pub fn thread(&self) -> &[Comment] {
        match self {
            Self::Count(_) => &[],
            Self::Thread(comments) => comments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Design,
    Business,
    Lifestyle,
    Health,
    Other(String),
}

pub const KNOWN_CATEGORIES: [Category; 5] = [
    Category::Tech,
    Category::Design,
    Category::Business,
    Category::Lifestyle,
    Category::Health,
];

impl Category {
    pub fn parse(value: &str) -> Self {
        match value {
            "tech" => Self::Tech,
            "design" => Self::Design,
            "business" => Self::Business,
            "lifestyle" => Self::Lifestyle,
            "health" => Self::Health,
            other => Self::Other(other.to_string()),
        }
    }

    /// Strict variant used for submissions: unknown values are rejected.
    pub fn from_known(value: &str) -> Option<Self> {
        match Self::parse(value) {
            Self::Other(_) => None,
            category => Some(category),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Tech => "tech",
            Self::Design => "design",
            Self::Business => "business",
            Self::Lifestyle => "lifestyle",
            Self::Health => "health",
            Self::Other(value) => value,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Tech => "Technology".to_string(),
            Self::Design => "Design".to_string(),
            Self::Business => "Business".to_string(),
            Self::Lifestyle => "Lifestyle".to_string(),
            Self::Health => "Health & Wellness".to_string(),
            Self::Other(_) => self.display_name(),
        }
    }

    /// Capitalized id, used for section headings and badges.
    pub fn display_name(&self) -> String {
        let value = self.as_str();
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn badge_tone(&self) -> &'static str {
        match self {
            Self::Tech => "sky",
            Self::Design => "pink",
            Self::Business => "amber",
            Self::Lifestyle => "emerald",
            Self::Health => "purple",
            Self::Other(_) => "gray",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Human phrase for the distance between `then` and `now`, e.g. "3 days ago".
pub fn relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let seconds = (now - then).whole_seconds();
    let future = seconds < 0;
    let seconds = seconds.abs();

    let distance = if seconds < 30 {
        "less than a minute".to_string()
    } else if seconds < 90 {
        "1 minute".to_string()
    } else if seconds < 45 * MINUTE {
        format!("{} minutes", (seconds + MINUTE / 2) / MINUTE)
    } else if seconds < 90 * MINUTE {
        "about 1 hour".to_string()
    } else if seconds < DAY {
        format!("about {} hours", (seconds + HOUR / 2) / HOUR)
    } else if seconds < 42 * HOUR {
        "1 day".to_string()
    } else if seconds < MONTH {
        format!("{} days", (seconds + DAY / 2) / DAY)
    } else if seconds < 45 * DAY {
        "about 1 month".to_string()
    } else if seconds < YEAR {
        format!("{} months", ((seconds + MONTH / 2) / MONTH).max(2))
    } else {
        let years = seconds / YEAR;
        let remainder = seconds % YEAR;
        if remainder < 3 * MONTH {
            if years == 1 {
                "about 1 year".to_string()
            } else {
                format!("about {} years", years)
            }
        } else if remainder < 9 * MONTH {
            format!("over {} years", years)
        } else {
            format!("almost {} years", years + 1)
        }
    };

    if future {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}
