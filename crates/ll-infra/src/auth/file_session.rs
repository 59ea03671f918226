//! File-based auth session
//!
//! The host's sign-in flow writes the identity of the signed-in user to a JSON
//! file; this adapter reads it back for the wizard.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use ll_core::ports::AuthSessionPort;
use ll_core::UserIdentity;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

pub struct FileAuthSession {
    session_file_path: PathBuf,
}

impl FileAuthSession {
    pub fn new(session_file_path: PathBuf) -> Self {
        Self { session_file_path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            session_file_path: base_dir.join(DEFAULT_SESSION_FILE),
        }
    }

    /// Record `identity` as the signed-in user.
    pub async fn sign_in(&self, identity: &UserIdentity) -> anyhow::Result<()> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(identity).context("Failed to serialize session")?;
        let mut file = fs::File::create(&self.session_file_path)
            .await
            .context("Failed to create session file")?;
        file.write_all(json.as_bytes())
            .await
            .context("Failed to write session file")?;
        file.sync_all().await.context("Failed to sync session file")?;
        Ok(())
    }

    pub async fn sign_out(&self) -> anyhow::Result<()> {
        if fs::try_exists(&self.session_file_path).await.unwrap_or(false) {
            fs::remove_file(&self.session_file_path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl AuthSessionPort for FileAuthSession {
    async fn current_user(&self) -> anyhow::Result<Option<UserIdentity>> {
        if !fs::try_exists(&self.session_file_path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.session_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let identity: UserIdentity = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse session file: {}", e))?;
        Ok(Some(identity))
    }
}
