//! Profile wizard orchestrator.
//!
//! This module coordinates the draft, the section lifecycles, navigation and the
//! storage side effects.

use std::sync::{Arc, Weak};

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info, info_span, warn, Instrument};

use ll_core::{
    CompletionMap, DocumentCategory, DocumentFile, Disposition, ProfileDraft, ProfileSession,
    SectionEvent, SectionForm, SectionId, SectionPhase, SectionUpdate, StepAction, StepEvent,
    StoredProfile, UploadedDocument, WizardStepper,
};

use super::autosave::AutosaveScheduler;
use super::config::WizardConfig;
use super::context::WizardContext;
use super::WizardError;
use crate::deps::WizardDeps;
use crate::usecases::editor::{SectionEditor, SectionUpdateSink};
use crate::usecases::{LoadProfile, SubmitOutcome, SubmitProfile, UploadDocument};

/// Controller for one user's profile-completion session.
///
/// Cheap to clone; clones share the same draft.
#[derive(Clone)]
pub struct ProfileWizard {
    inner: Arc<WizardInner>,
}

struct WizardInner {
    me: Weak<WizardInner>,
    session: ProfileSession,
    context: WizardContext,
    autosave: AutosaveScheduler,
    load_profile: LoadProfile,
    submit: SubmitProfile,
    upload: UploadDocument,
    deps: WizardDeps,
}

impl ProfileWizard {
    pub fn new(session: ProfileSession, deps: WizardDeps, config: WizardConfig) -> Self {
        let inner = Arc::new_cyclic(|me| WizardInner {
            me: me.clone(),
            session,
            context: WizardContext::default(),
            autosave: AutosaveScheduler::new(config.autosave_debounce),
            load_profile: LoadProfile::new(deps.auth.clone(), deps.profiles.clone()),
            submit: SubmitProfile::new(deps.profiles.clone()),
            upload: UploadDocument::new(
                deps.documents.clone(),
                config.document_policy,
                config.upload_timeout,
            ),
            deps,
        });
        Self { inner }
    }

    /// Resolve the signed-in user, then read and hydrate their stored profile.
    pub async fn load(deps: WizardDeps, config: WizardConfig) -> Result<Self, WizardError> {
        let session = LoadProfile::new(deps.auth.clone(), deps.profiles.clone())
            .session()
            .await?;
        info!(user_id = %session.user_id(), "profile wizard opened");

        let wizard = Self::new(session, deps, config);
        wizard.reload().await;
        Ok(wizard)
    }

    /// Read the stored profile again and hydrate it. Returns whether anything was stored.
    pub async fn reload(&self) -> bool {
        match self
            .inner
            .load_profile
            .execute(self.inner.session.user_id())
            .await
        {
            Some(stored) => {
                self.hydrate(stored).await;
                true
            }
            None => false,
        }
    }

    /// Push a stored profile into the draft without writing anything back.
    ///
    /// Sections with user edits keep their local value. Returns how many
    /// sections were applied.
    pub async fn hydrate(&self, stored: StoredProfile) -> usize {
        let span = info_span!(
            "usecase.profile_wizard.hydrate",
            user_id = %self.inner.session.user_id()
        );
        async move {
            let mut applied = 0;
            for data in stored.draft.sections() {
                if self
                    .inner
                    .handle_section_update(SectionUpdate::hydration(data))
                    .await
                {
                    applied += 1;
                }
            }
            debug!(applied, "stored profile hydrated");
            applied
        }
        .instrument(span)
        .await
    }

    /// Merge a change reported by a section. Returns whether it was applied.
    pub async fn handle_section_update(&self, update: SectionUpdate) -> bool {
        self.inner.handle_section_update(update).await
    }

    /// Open an editor for `T`, seeded from the draft and reporting back here.
    pub async fn editor<T: SectionForm>(&self) -> SectionEditor<T> {
        let initial = self
            .inner
            .context
            .with_state(|state| state.draft.get(T::ID))
            .await
            .and_then(T::from_data);
        let sink: Arc<dyn SectionUpdateSink> = self.inner.clone();
        SectionEditor::open(initial, self.inner.session.clone(), sink).await
    }

    /// Save the current section, then advance.
    pub async fn next(&self) -> SectionId {
        self.dispatch(StepEvent::Next).await.0
    }

    pub async fn previous(&self) -> SectionId {
        self.dispatch(StepEvent::Previous).await.0
    }

    pub async fn jump_to(&self, section: SectionId) -> SectionId {
        self.dispatch(StepEvent::Jump(section)).await.0
    }

    /// Finalize the profile if every required section is complete.
    pub async fn submit_profile(&self) -> SubmitOutcome {
        let completion = self.completion().await;
        if !completion.is_fully_complete() {
            let missing = completion.incomplete_required();
            let titles: Vec<&str> = missing.iter().map(|id| id.title()).collect();
            info!(progress = completion.progress(), missing = ?titles, "profile submit blocked");
            return SubmitOutcome::Rejected {
                progress: completion.progress(),
                missing,
            };
        }

        let (_, outcome) = self
            .dispatch(StepEvent::Submit {
                progress: completion.progress(),
            })
            .await;
        outcome.unwrap_or(SubmitOutcome::Rejected {
            progress: completion.progress(),
            missing: completion.incomplete_required(),
        })
    }

    /// Check and upload a credential document.
    ///
    /// The returned document is recorded in the form by the documents editor
    /// (`SectionEditor::<DocumentUploads>::record_upload`).
    pub async fn upload_document(
        &self,
        category: DocumentCategory,
        file: &DocumentFile,
    ) -> Result<UploadedDocument, WizardError> {
        let span = info_span!("usecase.profile_wizard.upload_document", category = %category);
        self.inner
            .upload
            .execute(self.inner.session.user_id(), category, file)
            .instrument(span)
            .await
            .map_err(WizardError::from)
    }

    /// Write every section with a pending autosave now.
    pub async fn flush_all(&self) {
        self.inner.flush_all().await;
    }

    pub fn session(&self) -> &ProfileSession {
        &self.inner.session
    }

    pub async fn draft(&self) -> ProfileDraft {
        self.inner.context.get_state().await.draft
    }

    pub async fn completion(&self) -> CompletionMap {
        self.inner
            .context
            .with_state(|state| state.completion.clone())
            .await
    }

    pub async fn progress(&self) -> u8 {
        self.completion().await.progress()
    }

    pub async fn can_submit(&self) -> bool {
        self.completion().await.is_fully_complete()
    }

    pub async fn current_section(&self) -> SectionId {
        self.inner
            .context
            .with_state(|state| state.step.section())
            .await
    }

    pub async fn phase(&self, section: SectionId) -> SectionPhase {
        self.inner
            .context
            .with_state(|state| state.phase(section))
            .await
    }

    pub async fn pending_autosaves(&self) -> Vec<SectionId> {
        self.inner.autosave.pending_sections().await
    }

    async fn dispatch(&self, event: StepEvent) -> (SectionId, Option<SubmitOutcome>) {
        let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.profile_wizard.dispatch", event = ?event);
        async {
            let (next, actions) = self
                .inner
                .context
                .with_state(|state| {
                    let from = state.step;
                    let (next, actions) = WizardStepper::transition(from, event);
                    info!(from = %from.section(), to = %next.section(), "wizard step transition");
                    (next, actions)
                })
                .await;

            let outcome = self.execute_actions(actions).await;
            self.inner
                .context
                .with_state(|state| state.step = next)
                .await;
            (next.section(), outcome)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<StepAction>) -> Option<SubmitOutcome> {
        let mut outcome = None;
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                StepAction::SaveSection(section) => {
                    self.inner.autosave.cancel(section).await;
                    self.inner.persist_section(section).await;
                }
                StepAction::FinalizeProfile => {
                    self.inner.flush_all().await;
                    let completion = self.completion().await;
                    outcome = Some(
                        self.inner
                            .submit
                            .execute(self.inner.session.user_id(), &completion)
                            .await,
                    );
                }
            }
        }
        outcome
    }
}

impl WizardInner {
    async fn handle_section_update(&self, update: SectionUpdate) -> bool {
        let section = update.data.id();
        if section != update.section {
            warn!(
                claimed = %update.section,
                actual = %section,
                "section update carries data for another section, dropped"
            );
            return false;
        }

        let span = info_span!(
            "usecase.profile_wizard.handle_section_update",
            section = %section,
            skip_persist = update.skip_persist
        );
        async move {
            let is_complete = update.data.is_complete();
            if is_complete != update.is_complete {
                warn!(
                    reported = update.is_complete,
                    computed = is_complete,
                    "section completeness disagrees with its data, using computed value"
                );
            }

            let event = if update.skip_persist {
                SectionEvent::Hydrate
            } else {
                SectionEvent::UserEdit
            };

            let disposition = self
                .context
                .with_state(|state| {
                    let disposition = state.apply_event(section, event);
                    if disposition == Disposition::Apply {
                        state.draft.set(update.data);
                        state.completion.set(section, is_complete);
                    }
                    disposition
                })
                .await;

            if disposition == Disposition::Ignore {
                debug!("hydration ignored, section has user edits");
                return false;
            }
            if !update.skip_persist {
                self.schedule_autosave(section).await;
            }
            true
        }
        .instrument(span)
        .await
    }

    async fn schedule_autosave(&self, section: SectionId) {
        if self.autosave.delay().is_zero() {
            self.persist_section(section).await;
            return;
        }

        let Some(me) = self.me.upgrade() else {
            return;
        };
        self.autosave
            .schedule(section, async move {
                me.persist_section(section).await;
            })
            .await;
    }

    /// Write the draft's current value of `section` and its completion flag.
    ///
    /// Failures are logged and dropped; the draft stays authoritative.
    async fn persist_section(&self, section: SectionId) {
        let Some(data) = self
            .context
            .with_state(|state| {
                let data = state.draft.get(section)?;
                state.apply_event(section, SectionEvent::SaveStarted);
                Some(data)
            })
            .await
        else {
            debug!(section = %section, "nothing to save");
            return;
        };

        let user_id = self.session.user_id();
        let is_complete = data.is_complete();
        let result = async {
            self.deps
                .profiles
                .write_section(user_id, &data)
                .await
                .with_context(|| format!("failed to write section {section}"))?;
            self.deps
                .profiles
                .set_completion_flag(user_id, section, is_complete)
                .await
                .with_context(|| format!("failed to write completion flag for {section}"))
        }
        .await;

        match result {
            Ok(()) => debug!(user_id = %user_id, section = %section, is_complete, "section saved"),
            Err(err) => warn!(user_id = %user_id, section = %section, error = %err, "autosave failed"),
        }

        self.context
            .with_state(|state| state.apply_event(section, SectionEvent::SaveSettled))
            .await;
    }

    async fn flush_all(&self) {
        for section in self.autosave.cancel_all().await {
            self.persist_section(section).await;
        }
    }
}

#[async_trait]
impl SectionUpdateSink for WizardInner {
    async fn on_update(&self, update: SectionUpdate) {
        self.handle_section_update(update).await;
    }
}
