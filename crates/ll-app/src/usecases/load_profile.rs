use std::sync::Arc;

use ll_core::ports::{AuthSessionPort, ProfileRepositoryPort};
use ll_core::{ProfileSession, StoredProfile, UserId};
use tracing::{debug, warn};

use super::wizard::WizardError;

/// Use case for resolving the session and reading the stored profile.
pub struct LoadProfile {
    auth: Arc<dyn AuthSessionPort>,
    profiles: Arc<dyn ProfileRepositoryPort>,
}

impl LoadProfile {
    pub fn new(auth: Arc<dyn AuthSessionPort>, profiles: Arc<dyn ProfileRepositoryPort>) -> Self {
        Self { auth, profiles }
    }

    /// Resolve the signed-in user.
    ///
    /// A missing session and an auth-service failure both end in
    /// [`WizardError::NotAuthenticated`]; the host redirects to sign-in either way.
    pub async fn session(&self) -> Result<ProfileSession, WizardError> {
        match self.auth.current_user().await {
            Ok(Some(identity)) => Ok(ProfileSession::new(identity)),
            Ok(None) => Err(WizardError::NotAuthenticated),
            Err(err) => {
                warn!(error = %err, "auth session lookup failed");
                Err(WizardError::NotAuthenticated)
            }
        }
    }

    /// Stored profile for `user_id`. Read failures are logged and treated as "nothing stored".
    pub async fn execute(&self, user_id: &UserId) -> Option<StoredProfile> {
        match self.profiles.read_profile(user_id).await {
            Ok(profile) => {
                debug!(user_id = %user_id, found = profile.is_some(), "profile loaded");
                profile
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "profile read failed, starting empty");
                None
            }
        }
    }
}
