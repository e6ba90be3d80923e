use tracing::info;

use crate::errors::ValidationError;
use crate::pages::{ActionResult, Outcome, Page};
use crate::password;
use crate::state::ClientState;

pub struct SignupPage {
    state: ClientState,
}

impl SignupPage {
    pub fn new(state: ClientState) -> Self {
        Self { state }
    }

    /// Policy and confirmation are checked locally first; only a password that
    /// passes both is sent.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> ActionResult {
        if !password::evaluate(password).all_satisfied {
            return Err(ValidationError::PasswordPolicy.into());
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        self.state.api.signup(username, email, password).await?;
        info!("Account created for {username}");
        Ok(Outcome::navigate(Page::Dashboard))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::errors::{ClientError, RequestError};
    use crate::state::test_state;

    fn page() -> (Arc<FakeApi>, SignupPage) {
        let api = Arc::new(FakeApi::default());
        let page = SignupPage::new(test_state(&api));
        (api, page)
    }

    #[tokio::test]
    async fn test_signup_success_navigates_to_dashboard() {
        let (api, mut page) = page();
        let outcome = page
            .signup("ada", "ada@example.test", "Abcdef1!", "Abcdef1!")
            .await
            .unwrap();
        assert_eq!(outcome.navigate, Some(Page::Dashboard));
        assert_eq!(api.calls(), vec!["signup"]);
    }

    #[tokio::test]
    async fn test_weak_password_never_hits_network() {
        let (api, mut page) = page();
        let err = page
            .signup("ada", "ada@example.test", "abcdef1!", "abcdef1!")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::PasswordPolicy)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_policy_is_checked_before_confirmation() {
        let (_, mut page) = page();
        let err = page
            .signup("ada", "ada@example.test", "short", "different")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Password does not meet requirements");
    }

    #[tokio::test]
    async fn test_mismatch_never_hits_network() {
        let (api, mut page) = page();
        let err = page
            .signup("ada", "ada@example.test", "Abcdef1!", "Abcdef1?")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_taken_username_shows_server_message() {
        let (api, mut page) = page();
        api.push_ack(Err(RequestError::rejected(
            400,
            Some("Username already exists".into()),
        )));
        let err = page
            .signup("ada", "ada@example.test", "Abcdef1!", "Abcdef1!")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Username already exists");
    }
}
