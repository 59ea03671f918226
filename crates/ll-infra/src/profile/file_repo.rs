use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use ll_core::ports::ProfileRepositoryPort;
use ll_core::{CompletionMap, SectionData, SectionId, StoredProfile, UserId};
use serde_json::{json, Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::normalizer::normalize_profile;

const PROFILES_DIR: &str = "profiles";

/// One JSON document per user at `<base>/profiles/<user>.json`.
///
/// Writes are read-modify-write under a repository-wide lock, so concurrent
/// writes of different sections for the same user are both kept.
pub struct FileProfileRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProfileRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn profile_path(&self, user_id: &UserId) -> Result<PathBuf> {
        if !user_id.is_path_safe() {
            bail!("user id is not usable as a file name: {user_id:?}");
        }
        Ok(self
            .base_dir
            .join(PROFILES_DIR)
            .join(format!("{}.json", user_id.as_str())))
    }

    async fn load(&self, path: &Path) -> Result<Option<StoredProfile>> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("read profile failed: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let raw: Value = serde_json::from_str(&content)
            .with_context(|| format!("parse profile failed: {}", path.display()))?;
        normalize_profile(&raw).map(Some)
    }

    async fn atomic_write(&self, path: &Path, profile: &StoredProfile) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create profile dir failed: {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(&to_document(profile)?)
            .context("serialize profile failed")?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp profile failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp profile to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }

    /// Apply `change` to the stored profile and write the result back.
    async fn modify(
        &self,
        user_id: &UserId,
        change: impl FnOnce(&mut StoredProfile),
    ) -> Result<()> {
        let path = self.profile_path(user_id)?;
        let _guard = self.write_lock.lock().await;

        let mut profile = self.load(&path).await?.unwrap_or_default();
        change(&mut profile);
        self.atomic_write(&path, &profile).await
    }
}

/// Canonical snake_case document for `profile`.
fn to_document(profile: &StoredProfile) -> Result<Value> {
    let mut document = Map::new();
    for data in profile.draft.sections() {
        document.insert(data.id().snake_key().to_string(), data.to_value()?);
    }

    let completion: Map<String, Value> = profile
        .completion_flags
        .iter()
        .map(|(id, done)| (id.snake_key().to_string(), Value::Bool(*done)))
        .collect();
    document.insert("completion".into(), Value::Object(completion));
    document.insert("profile_complete".into(), json!(profile.profile_complete));
    document.insert(
        "completion_percentage".into(),
        json!(profile.completion_percentage),
    );
    document.insert("updated_at".into(), json!(Utc::now().to_rfc3339()));
    Ok(Value::Object(document))
}

#[async_trait]
impl ProfileRepositoryPort for FileProfileRepository {
    async fn read_profile(&self, user_id: &UserId) -> Result<Option<StoredProfile>> {
        let path = self.profile_path(user_id)?;
        self.load(&path).await
    }

    async fn write_section(&self, user_id: &UserId, data: &SectionData) -> Result<()> {
        self.modify(user_id, |profile| profile.draft.set(data.clone()))
            .await?;
        debug!(user_id = %user_id, section = %data.id(), "profile section written");
        Ok(())
    }

    async fn set_completion_flag(
        &self,
        user_id: &UserId,
        section: SectionId,
        is_complete: bool,
    ) -> Result<()> {
        self.modify(user_id, |profile| {
            profile.completion_flags.insert(section, is_complete);

            let mut map = CompletionMap::new();
            for (id, done) in &profile.completion_flags {
                map.set(*id, *done);
            }
            // a finalized profile stays at 100 until a section turns incomplete
            if !is_complete {
                profile.profile_complete = false;
            }
            if !profile.profile_complete {
                profile.completion_percentage = map.progress();
            }
        })
        .await
    }

    async fn finalize_profile(&self, user_id: &UserId) -> Result<()> {
        self.modify(user_id, |profile| {
            profile.profile_complete = true;
            profile.completion_percentage = 100;
        })
        .await?;
        debug!(user_id = %user_id, "profile finalized");
        Ok(())
    }
}
