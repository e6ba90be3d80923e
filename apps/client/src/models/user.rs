use serde::{Deserialize, Serialize};

use crate::models::job::string_or_number;

/// The signed-in user as reported by `/api/check-session`.
/// Fetched once per page entry and read-only to the page that fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dark_mode: bool,
    /// Recommendations are on unless the user switched them off.
    #[serde(default = "enabled")]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub preferences: UserPreferences,
}

/// Job-search preferences that drive `/api/recommended-jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
}

impl UserPreferences {
    /// Builds preferences from the comma-separated form fields of the profile page.
    pub fn from_lists(titles: &str, locations: &str, job_types: &str) -> Self {
        Self {
            job_titles: split_list(titles),
            locations: split_list(locations),
            job_types: split_list(job_types),
        }
    }
}

fn enabled() -> bool {
    true
}

/// Splits on commas, trims each item and drops empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn session(username: &str, notifications_enabled: bool) -> UserSession {
    UserSession {
        id: Some("u-1".to_string()),
        username: username.to_string(),
        email: format!("{username}@example.test"),
        dark_mode: false,
        notifications_enabled,
        preferences: UserPreferences::default(),
    }
}
