use serde::{Deserialize, Serialize};

/// Where a section is in its editing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPhase {
    /// Nothing loaded from storage and nothing typed.
    #[default]
    Empty,
    /// Holds storage or identity-provider data; no user input yet.
    Hydrated,
    /// The user has changed at least one field.
    UserEditing,
    /// A write of user data is in flight.
    Saving,
}

impl SectionPhase {
    /// User input exists that incoming data must not overwrite.
    pub fn is_dirty(self) -> bool {
        matches!(self, SectionPhase::UserEditing | SectionPhase::Saving)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionEvent {
    /// Data loaded from storage.
    Hydrate,
    /// Fallback fill from the identity provider.
    Prefill,
    /// A field change caused by the user.
    UserEdit,
    SaveStarted,
    /// The write finished, successfully or not.
    SaveSettled,
}

/// Whether the caller should act on the event's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Apply,
    Ignore,
}

/// Pure lifecycle transition function.
pub struct SectionLifecycle;

impl SectionLifecycle {
    pub fn transition(phase: SectionPhase, event: SectionEvent) -> (SectionPhase, Disposition) {
        use Disposition::{Apply, Ignore};
        use SectionEvent as E;
        use SectionPhase as P;

        let (next, disposition) = match (phase, event) {
            (P::Empty | P::Hydrated, E::Hydrate) => (P::Hydrated, Apply),
            (P::UserEditing | P::Saving, E::Hydrate) => (phase, Ignore),

            (P::Empty, E::Prefill) => (P::Hydrated, Apply),
            (_, E::Prefill) => (phase, Ignore),

            (P::Saving, E::UserEdit) => (P::Saving, Apply),
            (_, E::UserEdit) => (P::UserEditing, Apply),

            (P::UserEditing, E::SaveStarted) => (P::Saving, Apply),
            (P::Saving, E::SaveSettled) => (P::UserEditing, Apply),

            (phase, _) => (phase, Ignore),
        };

        #[cfg(feature = "tracing")]
        if disposition == Ignore {
            tracing::trace!(?phase, ?event, "section lifecycle ignored event");
        }

        (next, disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydration_applies_until_the_user_types() {
        let (phase, d) = SectionLifecycle::transition(SectionPhase::Empty, SectionEvent::Hydrate);
        assert_eq!((phase, d), (SectionPhase::Hydrated, Disposition::Apply));

        let (phase, d) = SectionLifecycle::transition(phase, SectionEvent::Hydrate);
        assert_eq!((phase, d), (SectionPhase::Hydrated, Disposition::Apply));

        let (phase, _) = SectionLifecycle::transition(phase, SectionEvent::UserEdit);
        let (phase, d) = SectionLifecycle::transition(phase, SectionEvent::Hydrate);
        assert_eq!((phase, d), (SectionPhase::UserEditing, Disposition::Ignore));
    }

    #[test]
    fn hydration_is_ignored_while_saving() {
        let (phase, d) = SectionLifecycle::transition(SectionPhase::Saving, SectionEvent::Hydrate);
        assert_eq!((phase, d), (SectionPhase::Saving, Disposition::Ignore));
    }

    #[test]
    fn prefill_is_one_shot_from_empty() {
        let (phase, d) = SectionLifecycle::transition(SectionPhase::Empty, SectionEvent::Prefill);
        assert_eq!((phase, d), (SectionPhase::Hydrated, Disposition::Apply));

        for phase in [
            SectionPhase::Hydrated,
            SectionPhase::UserEditing,
            SectionPhase::Saving,
        ] {
            assert_eq!(
                SectionLifecycle::transition(phase, SectionEvent::Prefill),
                (phase, Disposition::Ignore)
            );
        }
    }

    #[test]
    fn save_cycle_returns_to_user_editing() {
        let (phase, _) = SectionLifecycle::transition(SectionPhase::Hydrated, SectionEvent::UserEdit);
        let (phase, d) = SectionLifecycle::transition(phase, SectionEvent::SaveStarted);
        assert_eq!((phase, d), (SectionPhase::Saving, Disposition::Apply));

        let (phase, d) = SectionLifecycle::transition(phase, SectionEvent::UserEdit);
        assert_eq!((phase, d), (SectionPhase::Saving, Disposition::Apply));

        let (phase, d) = SectionLifecycle::transition(phase, SectionEvent::SaveSettled);
        assert_eq!((phase, d), (SectionPhase::UserEditing, Disposition::Apply));
        assert!(phase.is_dirty());
    }

    #[test]
    fn save_events_out_of_order_are_ignored() {
        assert_eq!(
            SectionLifecycle::transition(SectionPhase::Hydrated, SectionEvent::SaveStarted),
            (SectionPhase::Hydrated, Disposition::Ignore)
        );
        assert_eq!(
            SectionLifecycle::transition(SectionPhase::UserEditing, SectionEvent::SaveSettled),
            (SectionPhase::UserEditing, Disposition::Ignore)
        );
    }
}
