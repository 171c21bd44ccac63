// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::validation::format_salary;
use crate::{
    AppMode, Candidate, CandidateId, CellKey, DEFAULT_SELECT_VISIBLE_LIMIT, Dataset, FieldUpdate,
    FilterCriteria, FilterForm, InlineEditError, InlineEdits, SelectionSet, SortDirection,
    SortKey, SortSpec, VisibleSequence, bulk_set_field,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub filter_form: FilterForm,
    pub status_line: Option<String>,
    applied_filters: Option<FilterCriteria>,
    sort: SortSpec,
    selection: SelectionSet,
    select_visible_limit: usize,
    inline: InlineEdits,
    dataset: Dataset,
    visible: VisibleSequence,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenFilterForm,
    CloseFilterForm,
    ApplyFilters,
    ClearFilters,
    ToggleSort(SortKey),
    ClearSort,
    ToggleSelect(CandidateId),
    SelectVisible,
    ClearSelection,
    BulkSet(FieldUpdate),
    BeginEdit(CellKey),
    CommitEdit,
    CancelEdit,
    OpenDetail(CandidateId),
    CloseDetail,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    FiltersApplied { visible: usize },
    FiltersCleared,
    SortChanged(SortSpec),
    SelectionChanged { selected: usize },
    RecordsUpdated { count: usize },
    EditRejected(InlineEditError),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut state = Self {
            mode: AppMode::Nav,
            filter_form: FilterForm::default(),
            status_line: None,
            applied_filters: None,
            sort: SortSpec::default(),
            selection: SelectionSet::default(),
            select_visible_limit: DEFAULT_SELECT_VISIBLE_LIMIT,
            inline: InlineEdits::default(),
            dataset: Dataset::new(candidates),
            visible: VisibleSequence::default(),
        };
        state.refresh_visible();
        state
    }

    pub fn with_select_visible_limit(mut self, limit: usize) -> Self {
        self.select_visible_limit = limit.max(1);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn applied_filters(&self) -> Option<&FilterCriteria> {
        self.applied_filters.as_ref()
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn inline(&self) -> &InlineEdits {
        &self.inline
    }

    /// Draft edits only; commits go through [`AppCommand::CommitEdit`].
    pub fn inline_mut(&mut self) -> &mut InlineEdits {
        &mut self.inline
    }

    pub fn editing_cell(&self) -> Option<CellKey> {
        match self.mode {
            AppMode::Edit(key) => Some(key),
            _ => None,
        }
    }

    pub fn visible(&self) -> &VisibleSequence {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Candidate at `position` in the visible sequence.
    pub fn visible_candidate(&self, position: usize) -> Option<&Candidate> {
        let index = *self.visible.indices().get(position)?;
        self.dataset.at(index)
    }

    pub fn visible_candidates(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.visible
            .indices()
            .iter()
            .filter_map(|index| self.dataset.at(*index))
    }

    pub fn position_of(&self, id: CandidateId) -> Option<usize> {
        self.visible_candidates()
            .position(|candidate| candidate.id == id)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        let events = match command {
            AppCommand::OpenFilterForm => self.set_mode(AppMode::Filter),
            AppCommand::CloseFilterForm => self.set_mode(AppMode::Nav),
            AppCommand::ApplyFilters => {
                self.applied_filters = Some(self.filter_form.criteria());
                self.refresh_visible();
                let visible = self.visible.len();
                let mut events = vec![AppEvent::FiltersApplied { visible }];
                events.extend(self.set_mode(AppMode::Nav));
                events.push(self.set_status(&format!("search: {visible} candidates")));
                events
            }
            AppCommand::ClearFilters => {
                self.filter_form = FilterForm::default();
                self.applied_filters = None;
                let mut events = vec![AppEvent::FiltersCleared];
                events.extend(self.set_mode(AppMode::Nav));
                events.push(self.set_status("filters cleared"));
                events
            }
            AppCommand::ToggleSort(key) => {
                self.sort.toggle(key);
                let arrow = match self.sort.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                };
                vec![
                    AppEvent::SortChanged(self.sort),
                    self.set_status(&format!("sort {} {arrow}", key.label())),
                ]
            }
            AppCommand::ClearSort => {
                self.sort.clear();
                vec![
                    AppEvent::SortChanged(self.sort),
                    self.set_status("sort cleared"),
                ]
            }
            AppCommand::ToggleSelect(id) => {
                self.selection.toggle(id);
                vec![self.selection_changed()]
            }
            AppCommand::SelectVisible => {
                self.refresh_visible();
                let ids = self
                    .visible_candidates()
                    .map(|candidate| candidate.id)
                    .collect::<Vec<_>>();
                self.selection.select_visible(ids, self.select_visible_limit);
                let selected = self.selection.len();
                vec![
                    self.selection_changed(),
                    self.set_status(&format!("{selected} selected")),
                ]
            }
            AppCommand::ClearSelection => {
                self.selection.clear();
                vec![self.selection_changed(), self.set_status("selection cleared")]
            }
            AppCommand::BulkSet(update) => self.bulk_set(update),
            AppCommand::BeginEdit(key) => match self.inline.begin(key, &self.dataset).map(|_| ()) {
                Ok(()) => self.set_mode(AppMode::Edit(key)),
                Err(error) => vec![self.set_status(&error.to_string())],
            },
            AppCommand::CommitEdit => self.commit_edit(),
            AppCommand::CancelEdit => {
                if let Some(key) = self.editing_cell() {
                    self.inline.cancel(key);
                }
                self.set_mode(AppMode::Nav)
            }
            AppCommand::OpenDetail(id) => {
                if self.dataset.contains(id) {
                    self.set_mode(AppMode::Detail(id))
                } else {
                    vec![self.set_status(&format!("candidate {id} not found"))]
                }
            }
            AppCommand::CloseDetail => self.set_mode(AppMode::Nav),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        };
        self.refresh_visible();
        events
    }

    fn bulk_set(&mut self, update: FieldUpdate) -> Vec<AppEvent> {
        if self.selection.is_empty() {
            return vec![self.set_status("nothing selected")];
        }
        let count = bulk_set_field(&mut self.dataset, &mut self.selection, update);
        let label = match update {
            FieldUpdate::CurrentStage(stage) => format!("stage {}", stage.as_str()),
            FieldUpdate::ExpectedSalary(salary) => format!("salary {}", format_salary(salary)),
            FieldUpdate::Reviewed(true) => "reviewed".to_owned(),
            FieldUpdate::Reviewed(false) => "unreviewed".to_owned(),
        };
        vec![
            AppEvent::RecordsUpdated { count },
            self.selection_changed(),
            self.set_status(&format!("{label}: {count} updated")),
        ]
    }

    fn commit_edit(&mut self) -> Vec<AppEvent> {
        let Some(key) = self.editing_cell() else {
            return vec![self.set_status("no edit in progress")];
        };
        let result = self.inline.commit(key, &mut self.dataset);
        let mut events = self.set_mode(AppMode::Nav);
        match result {
            Ok(update) => {
                events.push(AppEvent::RecordsUpdated { count: 1 });
                events.push(self.set_status(&format!("{} saved", update.field_label())));
            }
            Err(error) => {
                events.push(AppEvent::EditRejected(error));
                events.push(self.set_status(&error.to_string()));
            }
        }
        events
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        if let Some(key) = self.editing_cell()
            && mode != AppMode::Edit(key)
        {
            // Leaving edit mode by any other path drops the draft.
            self.inline.cancel(key);
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn selection_changed(&self) -> AppEvent {
        AppEvent::SelectionChanged {
            selected: self.selection.len(),
        }
    }

    fn refresh_visible(&mut self) {
        self.visible.ensure(
            self.dataset.candidates(),
            self.dataset.revision(),
            self.applied_filters.as_ref(),
            self.sort,
        );
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
