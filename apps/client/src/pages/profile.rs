use tracing::info;

use crate::api::types::ProfileUpdate;
use crate::errors::ValidationError;
use crate::models::{UserPreferences, UserSession};
use crate::notice::Notice;
use crate::pages::{require_session, ActionResult, Outcome};
use crate::password::{self, PasswordPolicyResult};
use crate::state::ClientState;

/// Account details and job-search preferences.
pub struct ProfilePage {
    state: ClientState,
    user: UserSession,
}

impl ProfilePage {
    pub async fn open(state: ClientState) -> Option<Self> {
        let user = require_session(state.api.as_ref()).await?;
        Some(Self::with_user(state, user))
    }

    pub fn with_user(state: ClientState, user: UserSession) -> Self {
        Self { state, user }
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    /// Checklist state for the new-password field. `None` hides the checklist:
    /// an empty field means the password stays unchanged.
    pub fn check_new_password(&self, new_password: &str) -> Option<PasswordPolicyResult> {
        password::evaluate_optional(new_password)
    }

    pub async fn update_account(
        &mut self,
        username: &str,
        email: &str,
        new_password: &str,
    ) -> ActionResult {
        if let Some(policy) = password::evaluate_optional(new_password) {
            if !policy.all_satisfied {
                return Err(ValidationError::PasswordPolicy.into());
            }
        }

        let update = ProfileUpdate {
            username: Some(username.trim().to_string()),
            email: Some(email.trim().to_string()),
            password: (!new_password.is_empty()).then(|| new_password.to_string()),
            ..ProfileUpdate::default()
        };
        self.state.api.update_profile(&update).await?;

        self.user.username = username.trim().to_string();
        self.user.email = email.trim().to_string();
        info!("Account updated for {}", self.user.username);
        Ok(Outcome::notice(Notice::success("Account updated successfully!")))
    }

    /// Each argument is a comma-separated list, as typed into the form.
    pub async fn update_preferences(
        &mut self,
        job_titles: &str,
        locations: &str,
        job_types: &str,
    ) -> ActionResult {
        let prefs = UserPreferences::from_lists(job_titles, locations, job_types);
        self.state
            .api
            .update_profile(&ProfileUpdate::preferences(prefs.clone()))
            .await?;

        info!(
            "Saved preferences: {} titles, {} locations, {} job types",
            prefs.job_titles.len(),
            prefs.locations.len(),
            prefs.job_types.len()
        );
        self.user.preferences = prefs;
        Ok(Outcome::notice(Notice::success(
            "Preferences saved successfully! Enable notifications in Settings to see recommendations.",
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::errors::{RequestError, NETWORK_ERROR_MESSAGE};
    use crate::models::user::session;
    use crate::state::test_state;

    fn page() -> (Arc<FakeApi>, ProfilePage) {
        let api = Arc::new(FakeApi::signed_in(session("ada", true)));
        let page = ProfilePage::with_user(test_state(&api), session("ada", true));
        (api, page)
    }

    #[tokio::test]
    async fn test_open_prefills_user() {
        let api = Arc::new(FakeApi::signed_in(session("ada", true)));
        let page = ProfilePage::open(test_state(&api)).await.unwrap();
        assert_eq!(page.user().email, "ada@example.test");
    }

    #[tokio::test]
    async fn test_account_update_without_password() {
        let (api, mut page) = page();
        let outcome = page
            .update_account("ada2", "ada2@example.test", "")
            .await
            .unwrap();
        assert_eq!(outcome.notice.unwrap().text, "Account updated successfully!");
        let sent = api.profile_updates.lock().unwrap()[0].clone();
        assert_eq!(sent.password, None);
        assert_eq!(sent.username.as_deref(), Some("ada2"));
        assert_eq!(page.user().username, "ada2");
    }

    #[tokio::test]
    async fn test_account_update_with_valid_password() {
        let (api, mut page) = page();
        page.update_account("ada", "ada@example.test", "Abcdef1!")
            .await
            .unwrap();
        let sent = api.profile_updates.lock().unwrap()[0].clone();
        assert_eq!(sent.password.as_deref(), Some("Abcdef1!"));
    }

    #[tokio::test]
    async fn test_weak_new_password_blocked_locally() {
        let (api, mut page) = page();
        let err = page
            .update_account("ada", "ada@example.test", "abc")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Password does not meet requirements");
        assert!(api.calls().is_empty());
        assert_eq!(page.user().username, "ada");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_local_user() {
        let (api, mut page) = page();
        api.push_ack(Err(RequestError::transport("connection refused")));
        let err = page
            .update_account("eve", "eve@example.test", "")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(page.user().username, "ada");
    }

    #[test]
    fn test_checklist_hidden_for_empty_password() {
        let (_, page) = page();
        assert_eq!(page.check_new_password(""), None);
        assert!(page.check_new_password("Abcdef1!").unwrap().all_satisfied);
    }

    #[tokio::test]
    async fn test_preferences_are_split_and_trimmed() {
        let (api, mut page) = page();
        let outcome = page
            .update_preferences("Rust Engineer, Backend ,", " Berlin", "fulltime,contract")
            .await
            .unwrap();
        assert!(outcome.notice.unwrap().text.contains("Enable notifications"));

        let sent = api.profile_updates.lock().unwrap()[0].clone();
        assert_eq!(
            sent.preferred_job_titles,
            Some(vec!["Rust Engineer".to_string(), "Backend".to_string()])
        );
        assert_eq!(sent.preferred_locations, Some(vec!["Berlin".to_string()]));
        assert_eq!(sent.username, None);
        assert_eq!(page.user().preferences.job_types, vec!["fulltime", "contract"]);
    }
}
