use async_trait::async_trait;

use crate::identity::UserIdentity;

#[async_trait]
pub trait AuthSessionPort: Send + Sync {
    /// Identity of the signed-in user, `None` when there is no session.
    async fn current_user(&self) -> anyhow::Result<Option<UserIdentity>>;
}
