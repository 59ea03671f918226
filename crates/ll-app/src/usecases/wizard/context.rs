use std::collections::BTreeMap;
use std::sync::Arc;

use ll_core::{
    CompletionMap, Disposition, ProfileDraft, SectionEvent, SectionId, SectionLifecycle,
    SectionPhase, WizardStep,
};
use tokio::sync::Mutex;

/// Everything the wizard knows about the profile being edited.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub draft: ProfileDraft,
    pub completion: CompletionMap,
    pub phases: BTreeMap<SectionId, SectionPhase>,
    pub step: WizardStep,
}

impl WizardState {
    pub fn phase(&self, section: SectionId) -> SectionPhase {
        self.phases.get(&section).copied().unwrap_or_default()
    }

    /// Run `event` through the section lifecycle and store the resulting phase.
    pub fn apply_event(&mut self, section: SectionId, event: SectionEvent) -> Disposition {
        let (next, disposition) = SectionLifecycle::transition(self.phase(section), event);
        self.phases.insert(section, next);
        disposition
    }
}

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes navigation and submit.
/// - `state`: short critical sections only; never held across a storage call.
#[derive(Clone, Default)]
pub struct WizardContext {
    state: Arc<Mutex<WizardState>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Run `f` against the state under the state lock.
    pub async fn with_state<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R {
        let mut guard = self.state.lock().await;
        f(&mut guard)
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn phases_default_to_empty_and_follow_events() {
        let context = WizardContext::default();

        let disposition = context
            .with_state(|state| {
                assert_eq!(state.phase(SectionId::Licensure), SectionPhase::Empty);
                state.apply_event(SectionId::Licensure, SectionEvent::UserEdit)
            })
            .await;

        assert_eq!(disposition, Disposition::Apply);
        let state = context.get_state().await;
        assert_eq!(state.phase(SectionId::Licensure), SectionPhase::UserEditing);
        assert_eq!(state.phase(SectionId::Questionnaires), SectionPhase::Empty);
    }
}
