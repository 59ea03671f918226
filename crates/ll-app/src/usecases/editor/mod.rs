//! Section editor.
//!
//! Owns a local copy of one section, validates it on every change and reports
//! each change upward through a [`SectionUpdateSink`]. It never persists
//! anything itself.

use std::sync::Arc;

use async_trait::async_trait;
use ll_core::lifecycle::{Disposition, SectionEvent, SectionLifecycle, SectionPhase};
use ll_core::section::{DocumentUploads, SectionForm, SectionUpdate};
use ll_core::{DocumentCategory, FieldErrors, ProfileSession, UploadedDocument};
use tracing::debug;

/// Receiver of section change notifications; implemented by the wizard.
#[async_trait]
pub trait SectionUpdateSink: Send + Sync {
    async fn on_update(&self, update: SectionUpdate);
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SectionEditor<T: SectionForm> {
    data: T,
    errors: FieldErrors,
    phase: SectionPhase,
    session: ProfileSession,
    sink: Arc<dyn SectionUpdateSink>,
}

impl<T: SectionForm> SectionEditor<T> {
    /// Open an editor on the last committed value, or `None` if storage has none.
    ///
    /// With no stored value the editor tries a one-time prefill from the session
    /// identity and reports it upward as a non-persisting update.
    pub async fn open(
        initial: Option<T>,
        session: ProfileSession,
        sink: Arc<dyn SectionUpdateSink>,
    ) -> Self {
        let mut editor = Self {
            errors: FieldErrors::new(),
            data: T::default(),
            phase: SectionPhase::Empty,
            session,
            sink,
        };

        match initial {
            Some(data) => {
                editor.phase = SectionLifecycle::transition(editor.phase, SectionEvent::Hydrate).0;
                editor.set_local(data);
            }
            None => editor.prefill().await,
        }
        editor
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_complete(&self) -> bool {
        self.data.is_complete()
    }

    pub fn phase(&self) -> SectionPhase {
        self.phase
    }

    /// Set one field, addressed by JSON pointer (`/address/city`, `/licenses/0/state`).
    ///
    /// The value is never rejected for failing validation; only an unknown path or a
    /// value of the wrong shape is an error.
    pub async fn set_field(
        &mut self,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), EditorError> {
        if !field.starts_with('/') {
            return Err(EditorError::UnknownField(field.to_string()));
        }

        let mut tree = serde_json::to_value(&self.data).map_err(|err| EditorError::InvalidValue {
            field: field.to_string(),
            reason: err.to_string(),
        })?;
        let slot = tree
            .pointer_mut(field)
            .ok_or_else(|| EditorError::UnknownField(field.to_string()))?;
        *slot = value;

        let next: T = serde_json::from_value(tree).map_err(|err| EditorError::InvalidValue {
            field: field.to_string(),
            reason: err.to_string(),
        })?;

        self.apply_user_edit(next).await;
        Ok(())
    }

    /// Typed edit of the local copy; same semantics as [`Self::set_field`].
    pub async fn update(&mut self, edit: impl FnOnce(&mut T)) {
        let mut next = self.data.clone();
        edit(&mut next);
        self.apply_user_edit(next).await;
    }

    /// Push data loaded from storage into the editor.
    ///
    /// Ignored once the user has typed. Returns whether the data was applied.
    pub async fn hydrate(&mut self, data: T) -> bool {
        let (phase, disposition) = SectionLifecycle::transition(self.phase, SectionEvent::Hydrate);
        self.phase = phase;
        if disposition == Disposition::Ignore {
            debug!(section = %T::ID, "hydration ignored, section has user edits");
            return false;
        }

        self.set_local(data);
        self.sink
            .on_update(SectionUpdate::hydration(self.data.clone().into_data()))
            .await;
        true
    }

    async fn prefill(&mut self) {
        let mut data = T::default();
        if !data.prefill_from_identity(self.session.identity()) {
            self.set_local(data);
            return;
        }

        let (phase, disposition) = SectionLifecycle::transition(self.phase, SectionEvent::Prefill);
        self.phase = phase;
        self.set_local(data);
        if disposition == Disposition::Apply {
            debug!(section = %T::ID, user_id = %self.session.user_id(), "section prefilled from identity");
            self.sink
                .on_update(SectionUpdate::hydration(self.data.clone().into_data()))
                .await;
        }
    }

    async fn apply_user_edit(&mut self, next: T) {
        self.phase = SectionLifecycle::transition(self.phase, SectionEvent::UserEdit).0;
        self.set_local(next);
        self.sink
            .on_update(SectionUpdate::user_edit(self.data.clone().into_data()))
            .await;
    }

    fn set_local(&mut self, data: T) {
        self.errors = data.validate();
        self.data = data;
    }
}

impl SectionEditor<DocumentUploads> {
    /// Record a finished upload in the form.
    pub async fn record_upload(&mut self, category: DocumentCategory, document: UploadedDocument) {
        self.update(|form| form.record(category, document)).await;
    }

    pub async fn remove_document(&mut self, category: DocumentCategory) {
        self.update(|form| {
            form.documents.remove(&category);
        })
        .await;
    }
}
