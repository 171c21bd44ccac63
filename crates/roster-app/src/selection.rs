// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;

use crate::CandidateId;

pub const DEFAULT_SELECT_VISIBLE_LIMIT: usize = 1_000;

/// Selected candidate ids. Membership is independent of what is currently
/// filtered or scrolled into view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<CandidateId>,
}

impl SelectionSet {
    /// Adds `id` when absent, removes it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Replaces the whole selection with the first `limit` ids.
    pub fn select_visible<I>(&mut self, ids: I, limit: usize)
    where
        I: IntoIterator<Item = CandidateId>,
    {
        self.ids = ids.into_iter().take(limit).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: CandidateId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.ids.iter().copied()
    }

    /// Drops ids the predicate no longer recognises. Returns how many were dropped.
    pub fn retain_known<F>(&mut self, mut exists: F) -> usize
    where
        F: FnMut(CandidateId) -> bool,
    {
        let before = self.ids.len();
        self.ids.retain(|id| exists(*id));
        before - self.ids.len()
    }
}
