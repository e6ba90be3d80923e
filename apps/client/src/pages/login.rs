use tracing::info;

use crate::errors::ValidationError;
use crate::notice::Notice;
use crate::pages::{ActionResult, Outcome, Page};
use crate::password;
use crate::state::ClientState;

/// The three panels of the login page. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginPanel {
    #[default]
    Login,
    Forgot,
    Reset,
}

/// Login page with the forgot/reset password flow.
pub struct LoginPage {
    state: ClientState,
    panel: LoginPanel,
    /// Address the last reset code was requested for; the reset form posts it back.
    reset_email: Option<String>,
}

impl LoginPage {
    pub fn new(state: ClientState) -> Self {
        Self {
            state,
            panel: LoginPanel::Login,
            reset_email: None,
        }
    }

    pub fn panel(&self) -> LoginPanel {
        self.panel
    }

    pub fn reset_email(&self) -> Option<&str> {
        self.reset_email.as_deref()
    }

    pub fn show_login(&mut self) {
        self.panel = LoginPanel::Login;
    }

    pub fn show_forgot(&mut self) {
        self.panel = LoginPanel::Forgot;
    }

    pub async fn login(&mut self, username: &str, password: &str) -> ActionResult {
        self.state.api.login(username, password).await?;
        info!("Signed in as {username}");
        Ok(Outcome::navigate(Page::Dashboard))
    }

    pub async fn forgot_password(&mut self, email: &str) -> ActionResult {
        self.panel = LoginPanel::Forgot;
        self.reset_email = Some(email.trim().to_string());

        let reply = self.state.api.forgot_password(email.trim()).await?;
        self.panel = LoginPanel::Reset;
        info!("Reset code requested for {}", email.trim());

        let text = match reply.dev_code {
            Some(code) => format!("Reset code sent! Code: {code}"),
            None => "Reset code sent! Check your email.".to_string(),
        };
        Ok(Outcome::notice(Notice::success(text)))
    }

    pub async fn reset_password(
        &mut self,
        code: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ActionResult {
        let email = self
            .reset_email
            .clone()
            .ok_or(ValidationError::MissingResetEmail)?;
        if !password::evaluate(new_password).all_satisfied {
            return Err(ValidationError::PasswordPolicy.into());
        }
        if new_password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        self.state
            .api
            .reset_password(&email, code.trim(), new_password)
            .await?;
        self.panel = LoginPanel::Login;
        info!("Password reset for {email}");
        Ok(Outcome::notice(Notice::success(
            "Password reset successful! Redirecting to login...",
        )))
    }
}
