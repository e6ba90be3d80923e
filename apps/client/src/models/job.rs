use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::listing::dates::parse_posted_date;

/// Salary placeholder the server emits when a source has no salary data.
const SALARY_NOT_SPECIFIED: &str = "Not specified";

/// A single job listing as returned by `/api/search` and `/api/recommended-jobs`.
///
/// Listings are read-only once received. The client identifies them by position
/// in the working set, never by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub source: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    /// Raw posting date: ISO-8601 text, a Unix timestamp, `"N/A"`, or absent.
    #[serde(default, deserialize_with = "string_or_number")]
    pub posted_date: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub employment_type: String,
    #[serde(default, deserialize_with = "salary")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub apply_link: String,
}

impl JobListing {
    /// Parsed posting instant, `None` when missing or unparsable.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_date.as_deref().and_then(parse_posted_date)
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_number(deserializer)?.unwrap_or_default())
}

/// Upstream sources disagree on scalar types (JSearch sends numeric salaries,
/// Arbeitnow sends epoch-second dates), so accept any scalar as text.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn salary<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_number(deserializer)?.filter(|s| {
        let s = s.trim();
        !s.is_empty() && s != SALARY_NOT_SPECIFIED
    }))
}

#[cfg(test)]
pub(crate) fn listing(title: &str, company: &str, employment_type: &str, posted: &str) -> JobListing {
    JobListing {
        id: None,
        source: "Arbeitnow".to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: "Berlin".to_string(),
        posted_date: Some(posted.to_string()),
        employment_type: employment_type.to_string(),
        salary: None,
        description: format!("{title} at {company}"),
        apply_link: "https://example.test/apply".to_string(),
    }
}
