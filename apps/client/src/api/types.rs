//! Request and reply bodies of the Job Sphere JSON API.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{JobListing, UserPreferences, UserSession};

/// Replies that carry the `{success, message?}` envelope.
pub trait Envelope {
    fn success(&self) -> bool;
    fn take_message(&mut self) -> Option<String>;
}

macro_rules! envelope {
    ($($ty:ty),+ $(,)?) => {
        $(impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn take_message(&mut self) -> Option<String> {
                self.message.take()
            }
        })+
    };
}

envelope!(Ack, ForgotPasswordReply, SearchReply, RecommendedJobsReply);

/// Bare `{success, message?}` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserSession>,
}

impl SessionStatus {
    /// The user, if and only if the server says the session is live.
    pub fn into_user(self) -> Option<UserSession> {
        if self.authenticated {
            self.user
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordReply {
    #[serde(default)]
    pub success: bool,
    /// The server hands back the reset code directly while it has no mailer.
    #[serde(default)]
    pub dev_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<JobListing>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedJobsReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub jobs: Option<Vec<JobListing>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Monthly quota of the paid job source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStats {
    pub used: u32,
    pub total: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    /// More than 75% of the quota used.
    Warning,
    /// More than 90% of the quota used.
    Critical,
}

impl ApiStats {
    pub fn usage_level(&self) -> UsageLevel {
        if self.total == 0 {
            return UsageLevel::Normal;
        }
        let percentage = f64::from(self.used) / f64::from(self.total) * 100.0;
        if percentage > 90.0 {
            UsageLevel::Critical
        } else if percentage > 75.0 {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "API Calls: {} / {} remaining this month",
            self.remaining, self.total
        )
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
    pub new_password: &'a str,
}

/// Which upstream job boards the server should query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    #[default]
    All,
    Arbeitnow,
    Jsearch,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::All => "all",
            JobSource::Arbeitnow => "arbeitnow",
            JobSource::Jsearch => "jsearch",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub source: JobSource,
}

/// Partial profile update. Absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_job_titles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_job_types: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn preferences(prefs: UserPreferences) -> Self {
        Self {
            preferred_job_titles: Some(prefs.job_titles),
            preferred_locations: Some(prefs.locations),
            preferred_job_types: Some(prefs.job_types),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}
