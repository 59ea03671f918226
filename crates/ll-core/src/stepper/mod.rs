//! Wizard navigation.
//!
//! A linear stepper over [`SectionId::ALL`] with sidebar jumps and a gated
//! submit. The transition function is pure; the wizard executes the actions.

use serde::{Deserialize, Serialize};

use crate::section::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardStep {
    index: usize,
}

impl WizardStep {
    pub fn at(section: SectionId) -> Self {
        Self {
            index: section.index(),
        }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn section(self) -> SectionId {
        SectionId::ALL[self.index.min(SectionId::ALL.len() - 1)]
    }

    pub fn is_first(self) -> bool {
        self.index == 0
    }

    pub fn is_last(self) -> bool {
        self.index + 1 >= SectionId::ALL.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    Next,
    Previous,
    Jump(SectionId),
    Submit { progress: u8 },
}

/// Side-effects produced by step transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// Persist the given section now, before leaving it.
    SaveSection(SectionId),
    /// Mark the profile complete in storage.
    FinalizeProfile,
}

pub struct WizardStepper;

impl WizardStepper {
    pub fn transition(step: WizardStep, event: StepEvent) -> (WizardStep, Vec<StepAction>) {
        match event {
            StepEvent::Next if step.is_last() => (step, Vec::new()),
            StepEvent::Next => (
                WizardStep {
                    index: step.index + 1,
                },
                vec![StepAction::SaveSection(step.section())],
            ),
            StepEvent::Previous if step.is_first() => (step, Vec::new()),
            StepEvent::Previous => (
                WizardStep {
                    index: step.index - 1,
                },
                Vec::new(),
            ),
            StepEvent::Jump(section) => (WizardStep::at(section), Vec::new()),
            StepEvent::Submit { progress } if progress == 100 => {
                (step, vec![StepAction::FinalizeProfile])
            }
            StepEvent::Submit { .. } => (step, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_saves_current_section_then_advances() {
        let (step, actions) = WizardStepper::transition(WizardStep::default(), StepEvent::Next);
        assert_eq!(step.section(), SectionId::ProfessionalInformation);
        assert_eq!(
            actions,
            vec![StepAction::SaveSection(SectionId::PersonalIdentifiers)]
        );
    }

    #[test]
    fn next_is_disabled_on_last_section() {
        let last = WizardStep::at(SectionId::OptionalPreferences);
        let (step, actions) = WizardStepper::transition(last, StepEvent::Next);
        assert_eq!(step, last);
        assert!(actions.is_empty());
    }

    #[test]
    fn previous_and_jump_never_save() {
        let step = WizardStep::at(SectionId::Licensure);
        let (prev, actions) = WizardStepper::transition(step, StepEvent::Previous);
        assert_eq!(prev.section(), SectionId::ProfessionalInformation);
        assert!(actions.is_empty());

        let (jumped, actions) =
            WizardStepper::transition(step, StepEvent::Jump(SectionId::DigitalSignature));
        assert_eq!(jumped.section(), SectionId::DigitalSignature);
        assert!(actions.is_empty());
    }

    #[test]
    fn previous_on_first_section_stays() {
        let (step, actions) = WizardStepper::transition(WizardStep::default(), StepEvent::Previous);
        assert!(step.is_first());
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_requires_full_progress() {
        let step = WizardStep::at(SectionId::DigitalSignature);
        let (_, actions) = WizardStepper::transition(step, StepEvent::Submit { progress: 83 });
        assert!(actions.is_empty());
        let (same, actions) = WizardStepper::transition(step, StepEvent::Submit { progress: 100 });
        assert_eq!(same, step);
        assert_eq!(actions, vec![StepAction::FinalizeProfile]);
    }
}
