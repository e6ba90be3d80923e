//! Page controllers, one per screen. A controller is built on page entry,
//! owns that page's view state, and is dropped on navigation. Controllers
//! never print; they return `Outcome`s that the shell renders.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod settings;
pub mod signup;

use std::fmt;

use tracing::{info, warn};

use crate::api::JobSphereApi;
use crate::errors::ClientError;
use crate::models::UserSession;
use crate::notice::Notice;

pub use dashboard::Dashboard;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use settings::SettingsPage;
pub use signup::SignupPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Page {
    Login,
    Signup,
    Dashboard,
    Profile,
    Settings,
}

impl Page {
    /// Pages that need a live session; entering one without it redirects to login.
    pub fn requires_session(&self) -> bool {
        matches!(self, Page::Dashboard | Page::Profile | Page::Settings)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Dashboard => "dashboard",
            Page::Profile => "profile",
            Page::Settings => "settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful controller action asks the UI to do next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub navigate: Option<Page>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigate: None,
        }
    }

    pub fn navigate(page: Page) -> Self {
        Self {
            notice: None,
            navigate: Some(page),
        }
    }
}

pub type ActionResult = Result<Outcome, ClientError>;

/// Checks the session on page entry. A transport failure counts as signed out,
/// so the user lands on the login page instead of a broken page.
pub async fn require_session(api: &dyn JobSphereApi) -> Option<UserSession> {
    match api.check_session().await {
        Ok(status) => {
            let user = status.into_user();
            if user.is_none() {
                info!("No valid session, redirecting to login");
            }
            user
        }
        Err(e) => {
            warn!("Session check failed: {e}");
            None
        }
    }
}

/// Shared by every signed-in page. A transport failure keeps the user where they are.
pub async fn logout(api: &dyn JobSphereApi) -> ActionResult {
    match api.logout().await {
        Ok(()) => {
            info!("Logged out");
            Ok(Outcome::navigate(Page::Login))
        }
        Err(e) => {
            warn!("Logout failed: {e}");
            Err(e.into())
        }
    }
}
