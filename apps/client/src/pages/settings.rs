use tracing::{info, warn};

use crate::api::types::SettingsUpdate;
use crate::models::UserSession;
use crate::notice::Notice;
use crate::pages::{require_session, ActionResult, Outcome};
use crate::state::ClientState;

/// Theme and notification toggles. A toggle flips immediately and flips back
/// if the server does not confirm the change.
pub struct SettingsPage {
    state: ClientState,
    user: UserSession,
}

impl SettingsPage {
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

    pub fn dark_mode(&self) -> bool {
        self.user.dark_mode
    }

    pub fn notifications_enabled(&self) -> bool {
        self.user.notifications_enabled
    }

    pub async fn set_dark_mode(&mut self, enabled: bool) -> ActionResult {
        let previous = std::mem::replace(&mut self.user.dark_mode, enabled);
        let update = SettingsUpdate {
            dark_mode: Some(enabled),
            notifications_enabled: None,
        };
        if let Err(e) = self.state.api.update_settings(&update).await {
            warn!("Dark mode update failed, reverting: {e}");
            self.user.dark_mode = previous;
            return Err(e.into());
        }
        info!("Dark mode set to {enabled}");
        Ok(Outcome::notice(Notice::success("Theme updated successfully!")))
    }

    pub async fn set_notifications(&mut self, enabled: bool) -> ActionResult {
        let previous = std::mem::replace(&mut self.user.notifications_enabled, enabled);
        let update = SettingsUpdate {
            dark_mode: None,
            notifications_enabled: Some(enabled),
        };
        if let Err(e) = self.state.api.update_settings(&update).await {
            warn!("Notification update failed, reverting: {e}");
            self.user.notifications_enabled = previous;
            return Err(e.into());
        }
        info!("Notifications set to {enabled}");
        Ok(Outcome::notice(Notice::success(
            "Notification settings updated! Refresh Home page to see changes.",
        )))
    }
}
