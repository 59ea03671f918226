use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::section::SectionId;

/// Per-section completion flags, one entry per section.
///
/// The optional preferences section is always `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<SectionId, bool>);

impl CompletionMap {
    pub fn new() -> Self {
        Self(
            SectionId::ALL
                .into_iter()
                .map(|id| (id, !id.is_required()))
                .collect(),
        )
    }

    pub fn set(&mut self, section: SectionId, is_complete: bool) {
        self.0.insert(section, is_complete || !section.is_required());
    }

    pub fn get(&self, section: SectionId) -> bool {
        self.0.get(&section).copied().unwrap_or(!section.is_required())
    }

    pub fn completed_required(&self) -> usize {
        SectionId::REQUIRED
            .into_iter()
            .filter(|id| self.get(*id))
            .count()
    }

    /// `round(100 * completed_required / required)`.
    pub fn progress(&self) -> u8 {
        let total = SectionId::REQUIRED.len() as f64;
        let done = self.completed_required() as f64;
        (100.0 * done / total).round() as u8
    }

    pub fn is_fully_complete(&self) -> bool {
        self.completed_required() == SectionId::REQUIRED.len()
    }

    pub fn incomplete_required(&self) -> Vec<SectionId> {
        SectionId::REQUIRED
            .into_iter()
            .filter(|id| !self.get(*id))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, bool)> + '_ {
        self.0.iter().map(|(id, done)| (*id, *done))
    }
}

impl Default for CompletionMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_map_has_every_section_and_zero_progress() {
        let map = CompletionMap::new();
        assert_eq!(map.iter().count(), 7);
        assert!(map.get(SectionId::OptionalPreferences));
        assert_eq!(map.progress(), 0);
    }

    #[test]
    fn three_of_six_is_fifty_percent() {
        let mut map = CompletionMap::new();
        map.set(SectionId::PersonalIdentifiers, true);
        map.set(SectionId::Licensure, true);
        map.set(SectionId::DigitalSignature, true);
        assert_eq!(map.progress(), 50);
    }

    #[test]
    fn progress_rounds_to_nearest() {
        let mut map = CompletionMap::new();
        map.set(SectionId::PersonalIdentifiers, true);
        assert_eq!(map.progress(), 17);
        map.set(SectionId::Licensure, true);
        assert_eq!(map.progress(), 33);
        map.set(SectionId::Questionnaires, true);
        map.set(SectionId::DocumentUploads, true);
        assert_eq!(map.progress(), 67);
    }

    #[test]
    fn preferences_cannot_be_marked_incomplete() {
        let mut map = CompletionMap::new();
        map.set(SectionId::OptionalPreferences, false);
        assert!(map.get(SectionId::OptionalPreferences));
    }

    #[test]
    fn full_completion() {
        let mut map = CompletionMap::new();
        for id in SectionId::REQUIRED {
            map.set(id, true);
        }
        assert!(map.is_fully_complete());
        assert_eq!(map.progress(), 100);
        map.set(SectionId::Licensure, false);
        assert!(!map.is_fully_complete());
        assert_eq!(map.incomplete_required(), vec![SectionId::Licensure]);
    }
}
