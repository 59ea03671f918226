use std::sync::Arc;

use ll_core::ports::ProfileRepositoryPort;
use ll_core::{CompletionMap, SectionId, UserId};
use tracing::{info, warn};

/// Result of a submit attempt. Storage failures end here instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required sections are incomplete; storage was not touched.
    Rejected {
        progress: u8,
        missing: Vec<SectionId>,
    },
    /// Finalized and confirmed by re-reading the stored profile.
    Submitted,
    /// Finalize succeeded but the re-read did not show a completed profile.
    Unconfirmed,
    /// Finalize failed.
    Failed { reason: String },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Use case for marking the profile complete.
pub struct SubmitProfile {
    profiles: Arc<dyn ProfileRepositoryPort>,
}

impl SubmitProfile {
    pub fn new(profiles: Arc<dyn ProfileRepositoryPort>) -> Self {
        Self { profiles }
    }

    pub async fn execute(&self, user_id: &UserId, completion: &CompletionMap) -> SubmitOutcome {
        if !completion.is_fully_complete() {
            let outcome = SubmitOutcome::Rejected {
                progress: completion.progress(),
                missing: completion.incomplete_required(),
            };
            info!(user_id = %user_id, ?outcome, "profile submit rejected");
            return outcome;
        }

        if let Err(err) = self.profiles.finalize_profile(user_id).await {
            warn!(user_id = %user_id, error = %err, "profile finalize failed");
            return SubmitOutcome::Failed {
                reason: err.to_string(),
            };
        }

        match self.profiles.read_profile(user_id).await {
            Ok(Some(profile))
                if profile.profile_complete && profile.completion_percentage == 100 =>
            {
                info!(user_id = %user_id, "profile submitted");
                SubmitOutcome::Submitted
            }
            Ok(_) => {
                warn!(user_id = %user_id, "profile finalize not reflected in storage");
                SubmitOutcome::Unconfirmed
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "profile confirm read failed");
                SubmitOutcome::Unconfirmed
            }
        }
    }
}
