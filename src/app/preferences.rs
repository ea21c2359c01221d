use std::collections::BTreeMap;

use crate::domain::preferences::{Theme, Tip};
use crate::infra::store::PreferenceStore;

const VISITED_KEY: &str = "curator:visited";
const TIPS_KEY: &str = "curator:tips";
const THEME_KEY: &str = "curator:theme";

pub const WELCOME_TITLE: &str = "Welcome to Curator!";
pub const WELCOME_MESSAGE: &str = "Discover and share the best content from around the web.";

/// Onboarding tips and theme, read and written through an injected store.
pub struct Preferences<S: PreferenceStore> {
    store: S,
    first_visit: bool,
    seen_tips: BTreeMap<String, bool>,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Marks the store as visited. A store without the visited key is a first visit.
    pub fn init(mut store: S) -> Self {
        let first_visit = store.get(VISITED_KEY).is_none();
        if first_visit {
            store.set(VISITED_KEY, "true".to_string());
        }

        let seen_tips = match store.get(TIPS_KEY) {
            Some(payload) => serde_json::from_str(&payload).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding unreadable onboarding tips");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };

        Self {
            store,
            first_visit,
            seen_tips,
        }
    }

    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    /// Returns the tip the first time `id` is requested during a first visit.
    pub fn show_tip(&mut self, id: &str, message: &str) -> Option<Tip> {
        if !self.first_visit || self.seen_tips.get(id).copied().unwrap_or(false) {
            return None;
        }

        self.seen_tips.insert(id.to_string(), true);
        match serde_json::to_string(&self.seen_tips) {
            Ok(payload) => self.store.set(TIPS_KEY, payload),
            Err(err) => tracing::warn!(error = %err, "failed to persist onboarding tips"),
        }

        Some(Tip {
            id: id.to_string(),
            title: "Tip",
            message: message.to_string(),
        })
    }

    pub fn dismiss(&mut self) {
        self.first_visit = false;
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|value| Theme::from_store(&value))
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_store().to_string());
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
