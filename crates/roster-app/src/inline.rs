// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::validation::{self, ValidationError};
use crate::{Candidate, CandidateId, Dataset, EditableField, FieldUpdate, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub id: CandidateId,
    pub field: EditableField,
}

impl CellKey {
    pub const fn new(id: CandidateId, field: EditableField) -> Self {
        Self { id, field }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Stage(Stage),
    Salary(String),
}

impl Draft {
    fn from_committed(candidate: &Candidate, field: EditableField) -> Self {
        match field {
            EditableField::Stage => Self::Stage(candidate.current_stage),
            EditableField::ExpectedSalary => Self::Salary(candidate.expected_salary.to_string()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Stage(stage) => stage.as_str().to_owned(),
            Self::Salary(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState<'a> {
    Display,
    Editing(&'a Draft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineEditError {
    NotEditing,
    UnknownCandidate(CandidateId),
    Invalid(ValidationError),
}

impl std::fmt::Display for InlineEditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => f.write_str("no edit in progress"),
            Self::UnknownCandidate(id) => write!(f, "candidate {id} not found"),
            Self::Invalid(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for InlineEditError {}

impl From<ValidationError> for InlineEditError {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(error)
    }
}

/// Transient per-cell edit drafts, keyed by candidate and field. A cell with
/// no entry is in the display state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineEdits {
    sessions: HashMap<CellKey, Draft>,
}

impl InlineEdits {
    /// Display -> Editing, seeding the draft from the committed value.
    pub fn begin(&mut self, key: CellKey, dataset: &Dataset) -> Result<&Draft, InlineEditError> {
        let candidate = dataset
            .get(key.id)
            .ok_or(InlineEditError::UnknownCandidate(key.id))?;
        let draft = Draft::from_committed(candidate, key.field);
        Ok(self.sessions.entry(key).insert_entry(draft).into_mut())
    }

    pub fn state(&self, key: CellKey) -> CellState<'_> {
        match self.sessions.get(&key) {
            Some(draft) => CellState::Editing(draft),
            None => CellState::Display,
        }
    }

    pub fn is_editing(&self, key: CellKey) -> bool {
        self.sessions.contains_key(&key)
    }

    pub fn push_char(&mut self, key: CellKey, ch: char) {
        if let Some(Draft::Salary(text)) = self.sessions.get_mut(&key) {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self, key: CellKey) {
        if let Some(Draft::Salary(text)) = self.sessions.get_mut(&key) {
            text.pop();
        }
    }

    pub fn set_text(&mut self, key: CellKey, value: &str) {
        if let Some(Draft::Salary(text)) = self.sessions.get_mut(&key) {
            value.clone_into(text);
        }
    }

    pub fn cycle_option(&mut self, key: CellKey, delta: isize) {
        if let Some(Draft::Stage(stage)) = self.sessions.get_mut(&key) {
            *stage = stage.cycle(delta);
        }
    }

    pub fn choose_stage(&mut self, key: CellKey, stage: Stage) {
        if let Some(Draft::Stage(current)) = self.sessions.get_mut(&key) {
            *current = stage;
        }
    }

    /// Editing -> Display without touching the record.
    pub fn cancel(&mut self, key: CellKey) -> bool {
        self.sessions.remove(&key).is_some()
    }

    /// Editing -> Display. On success exactly one field of one record has
    /// been replaced; on rejection the record is unchanged and the draft is
    /// discarded, so the cell shows the committed value again.
    pub fn commit(
        &mut self,
        key: CellKey,
        dataset: &mut Dataset,
    ) -> Result<FieldUpdate, InlineEditError> {
        let draft = self
            .sessions
            .remove(&key)
            .ok_or(InlineEditError::NotEditing)?;

        let update = match draft {
            Draft::Stage(stage) => FieldUpdate::CurrentStage(stage),
            Draft::Salary(text) => {
                FieldUpdate::ExpectedSalary(validation::parse_salary(&text).inspect_err(
                    |error| {
                        tracing::warn!(id = %key.id, draft = %text, %error, "inline edit rejected");
                    },
                )?)
            }
        };

        if !dataset.update(key.id, update) {
            return Err(InlineEditError::UnknownCandidate(key.id));
        }
        Ok(update)
    }
}
