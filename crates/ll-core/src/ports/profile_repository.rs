//! Profile persistence port
//!
//! Each section is written independently; there is no cross-section
//! transaction. Implementations must accept concurrent writes of different
//! sections for the same user without losing either.

use async_trait::async_trait;

use crate::ids::UserId;
use crate::section::{SectionData, SectionId, StoredProfile};

#[async_trait]
pub trait ProfileRepositoryPort: Send + Sync {
    /// Normalized profile, `None` if the user has never saved anything.
    async fn read_profile(&self, user_id: &UserId) -> anyhow::Result<Option<StoredProfile>>;

    /// Replace one section's value.
    async fn write_section(&self, user_id: &UserId, data: &SectionData) -> anyhow::Result<()>;

    async fn set_completion_flag(
        &self,
        user_id: &UserId,
        section: SectionId,
        is_complete: bool,
    ) -> anyhow::Result<()>;

    /// Mark the profile complete with percentage 100.
    async fn finalize_profile(&self, user_id: &UserId) -> anyhow::Result<()>;
}
