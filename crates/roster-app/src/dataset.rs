// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::{Candidate, CandidateId, FieldUpdate, SelectionSet};

/// In-memory candidate store. Insertion order is the display order when no
/// sort is active; every successful mutation bumps `revision`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    candidates: Vec<Candidate>,
    positions: HashMap<CandidateId, usize>,
    revision: u64,
}

impl Dataset {
    /// Later duplicates of an id are dropped so ids stay unique.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut kept = Vec::with_capacity(candidates.len());
        let mut positions = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            if positions.contains_key(&candidate.id) {
                tracing::warn!(id = %candidate.id, "duplicate candidate id dropped");
                continue;
            }
            positions.insert(candidate.id, kept.len());
            kept.push(candidate);
        }
        Self {
            candidates: kept,
            positions,
            revision: 0,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.positions
            .get(&id)
            .and_then(|index| self.candidates.get(*index))
    }

    pub fn at(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Replaces one field of one record. Unknown ids are ignored.
    pub fn update(&mut self, id: CandidateId, update: FieldUpdate) -> bool {
        let Some(index) = self.positions.get(&id).copied() else {
            return false;
        };
        update.apply(&mut self.candidates[index]);
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Applies `update` to every selected candidate, then clears the selection.
/// An empty selection is a no-op that touches neither the dataset nor the
/// selection. Returns the number of records changed.
pub fn bulk_set_field(
    dataset: &mut Dataset,
    selection: &mut SelectionSet,
    update: FieldUpdate,
) -> usize {
    if selection.is_empty() {
        return 0;
    }

    let mut updated = 0;
    for id in selection.iter() {
        if let Some(index) = dataset.positions.get(&id).copied() {
            update.apply(&mut dataset.candidates[index]);
            updated += 1;
        }
    }
    if updated > 0 {
        dataset.bump();
    }
    selection.clear();

    tracing::info!(
        field = update.field_label(),
        updated,
        "bulk update applied"
    );
    updated
}

#[cfg(test)]
mod tests {
    use super::{Dataset, bulk_set_field};
    use crate::{CandidateFaker, CandidateId, FieldUpdate, SelectionSet, Stage};
    use time::{Date, Month};

    fn dataset(count: usize) -> Dataset {
        let today = Date::from_calendar_date(2026, Month::March, 1).expect("valid date");
        Dataset::new(CandidateFaker::new(11).candidates(count, today))
    }

    #[test]
    fn update_replaces_exactly_one_field() {
        let mut data = dataset(3);
        let before = data.get(CandidateId::new(2)).cloned().expect("candidate 2");

        assert!(data.update(CandidateId::new(2), FieldUpdate::ExpectedSalary(450_000)));

        let after = data.get(CandidateId::new(2)).expect("candidate 2");
        assert_eq!(after.expected_salary, 450_000);
        let mut expected = before;
        expected.expected_salary = 450_000;
        assert_eq!(*after, expected);
        assert_eq!(data.revision(), 1);
    }

    #[test]
    fn update_for_unknown_id_is_ignored() {
        let mut data = dataset(2);
        let before = data.clone();
        assert!(!data.update(CandidateId::new(77), FieldUpdate::Reviewed(true)));
        assert_eq!(data, before);
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let mut candidates = dataset(2).candidates().to_vec();
        candidates.push(candidates[0].clone());
        let data = Dataset::new(candidates);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn bulk_on_empty_selection_is_a_no_op() {
        let mut data = dataset(5);
        let before = data.clone();
        let mut selection = SelectionSet::default();

        let updated = bulk_set_field(&mut data, &mut selection, FieldUpdate::Reviewed(true));
        assert_eq!(updated, 0);
        assert_eq!(data, before);
        assert!(selection.is_empty());
    }

    #[test]
    fn bulk_updates_selected_and_clears_selection() {
        let mut data = dataset(5);
        let before = data.clone();
        let mut selection = SelectionSet::default();
        selection.toggle(CandidateId::new(1));
        selection.toggle(CandidateId::new(3));
        selection.toggle(CandidateId::new(404));

        let updated = bulk_set_field(
            &mut data,
            &mut selection,
            FieldUpdate::CurrentStage(Stage::Offer),
        );

        assert_eq!(updated, 2);
        assert!(selection.is_empty());
        for (old, new) in before.candidates().iter().zip(data.candidates()) {
            let mut expected = old.clone();
            if matches!(old.id.get(), 1 | 3) {
                expected.current_stage = Stage::Offer;
            }
            assert_eq!(*new, expected);
        }
        assert_eq!(data.revision(), before.revision() + 1);
    }
}
