// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod window;

pub use window::{DEFAULT_ROW_HEIGHT, RowWindow};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use roster_app::validation::format_salary;
use roster_app::{
    AppCommand, AppEvent, AppMode, AppState, Candidate, CandidateId, CellKey, CellState, Draft,
    EditableField, FieldUpdate, FilterCriteria, FilterField, JobAssociation, SortDirection,
    SortKey, SortSpec, Stage,
};
use std::collections::HashSet;
use std::io;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const COLUMN_SPACING: u16 = 1;
const JOBS_COLLAPSED_COUNT: usize = 2;
const MOUSE_SCROLL_ROWS: isize = 3;
const EMPTY_STATE_TEXT: &str = "No results. Try changing filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiOptions {
    pub row_height: u16,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Select,
    Name,
    Email,
    Mobile,
    Jobs,
    Company,
    Stage,
    ExpectedSalary,
    Applied,
    Reviewed,
}

impl Column {
    pub const ALL: [Self; 10] = [
        Self::Select,
        Self::Name,
        Self::Email,
        Self::Mobile,
        Self::Jobs,
        Self::Company,
        Self::Stage,
        Self::ExpectedSalary,
        Self::Applied,
        Self::Reviewed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Select => "sel",
            Self::Name => "name",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Jobs => "jobs",
            Self::Company => "company",
            Self::Stage => "stage",
            Self::ExpectedSalary => "exp salary",
            Self::Applied => "applied",
            Self::Reviewed => "rev",
        }
    }

    const fn width(self) -> u16 {
        match self {
            Self::Select | Self::Reviewed => 3,
            Self::Name => 16,
            Self::Email => 27,
            Self::Mobile => 13,
            Self::Jobs => 40,
            Self::Company => 11,
            Self::Stage => 14,
            Self::ExpectedSalary => 12,
            Self::Applied => 10,
        }
    }

    pub const fn sort_key(self) -> Option<SortKey> {
        match self {
            Self::Name => Some(SortKey::Name),
            Self::Email => Some(SortKey::Email),
            Self::Company => Some(SortKey::Company),
            Self::Stage => Some(SortKey::Stage),
            Self::ExpectedSalary => Some(SortKey::ExpectedSalary),
            Self::Applied => Some(SortKey::AppliedDate),
            Self::Select | Self::Mobile | Self::Jobs | Self::Reviewed => None,
        }
    }

    pub const fn editable_field(self) -> Option<EditableField> {
        match self {
            Self::Stage => Some(EditableField::Stage),
            Self::ExpectedSalary => Some(EditableField::ExpectedSalary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ToggleSelect,
    BeginEdit(EditableField),
    ToggleJobs,
    OpenDetail,
}

/// What activating a cell does. Interactive controls (checkbox, inline
/// editors, the jobs disclosure) handle the activation themselves and never
/// open the detail modal.
pub fn row_click_action(column: Column, candidate: &Candidate) -> RowAction {
    match column {
        Column::Select => RowAction::ToggleSelect,
        Column::Jobs if candidate.jobs_associated.len() > JOBS_COLLAPSED_COUNT => {
            RowAction::ToggleJobs
        }
        other => other
            .editable_field()
            .map_or(RowAction::OpenDetail, RowAction::BeginEdit),
    }
}

/// Display cells for one candidate, in [`Column::ALL`] order. Pure in the
/// record and its per-row UI flags.
pub fn project_row(candidate: &Candidate, selected: bool, jobs_expanded: bool) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|column| match column {
            Column::Select => checkbox(selected).to_owned(),
            Column::Name => candidate.name.clone(),
            Column::Email => candidate.email.clone(),
            Column::Mobile => candidate.mobile.clone(),
            Column::Jobs => jobs_label(candidate, jobs_expanded),
            Column::Company => candidate.current_company.as_str().to_owned(),
            Column::Stage => candidate.current_stage.as_str().to_owned(),
            Column::ExpectedSalary => format_salary(candidate.expected_salary),
            Column::Applied => candidate.applied_date.to_string(),
            Column::Reviewed => reviewed_mark(candidate.reviewed).to_owned(),
        })
        .collect()
}

fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn reviewed_mark(reviewed: bool) -> &'static str {
    if reviewed { "✓" } else { "" }
}

fn jobs_label(candidate: &Candidate, expanded: bool) -> String {
    let labels = candidate
        .jobs_associated
        .iter()
        .map(JobAssociation::label)
        .collect::<Vec<_>>();
    if labels.len() <= JOBS_COLLAPSED_COUNT {
        return labels.join(", ");
    }
    if expanded {
        format!("{} [less]", labels.join(", "))
    } else {
        format!("{}... [more]", labels[..JOBS_COLLAPSED_COUNT].join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    MoveHalfPageDown,
    MoveHalfPageUp,
    MoveFullPageDown,
    MoveFullPageUp,
    JumpFirstRow,
    JumpLastRow,
    JumpFirstColumn,
    JumpLastColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableHit {
    Header(Column),
    Cell { position: usize, column: Column },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenLayout {
    top: Rect,
    table: Rect,
    footer: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct StagePickerUiState {
    visible: bool,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    screen: Rect,
    cursor_row: usize,
    cursor_col: usize,
    window: RowWindow,
    expanded_jobs: HashSet<CandidateId>,
    filter_field: usize,
    stage_picker: StagePickerUiState,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(row_height: u16) -> Self {
        Self {
            cursor_col: 1,
            window: RowWindow::new(row_height),
            ..Self::default()
        }
    }
}

pub fn run_app(state: &mut AppState, options: TuiOptions) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = event_loop(&mut terminal, state, options);

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    options: TuiOptions,
) -> Result<()> {
    let mut view_data = ViewData::new(options.row_height);
    let (internal_tx, internal_rx) = mpsc::channel();
    tracing::info!(
        candidates = state.dataset().len(),
        row_height = options.row_height,
        "tui started"
    );

    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        let size = terminal.size().context("read terminal size")?;
        sync_viewport(
            state,
            &mut view_data,
            Rect::new(0, 0, size.width, size.height),
        );
        terminal
            .draw(|frame| render(frame, state, &view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(state, &mut view_data, &internal_tx, mouse),
            _ => {}
        }
    }

    tracing::info!(selected = state.selection().len(), "tui stopped");
    Ok(())
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    bump_status_token(view_data, internal_tx);
}

fn bump_status_token(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Dispatches and keeps the cursor on the same candidate when it is still
/// visible. New filter results start from the top.
fn dispatch_and_sync(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    let anchor = state
        .visible_candidate(view_data.cursor_row)
        .map(|candidate| candidate.id);
    let events = state.dispatch(command);

    let filters_changed = events.iter().any(|event| {
        matches!(
            event,
            AppEvent::FiltersApplied { .. } | AppEvent::FiltersCleared
        )
    });
    if filters_changed {
        view_data.cursor_row = 0;
        view_data.window.reset();
    } else if let Some(id) = anchor
        && let Some(position) = state.position_of(id)
    {
        view_data.cursor_row = position;
    }
    clamp_cursor(state, view_data);

    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        bump_status_token(view_data, internal_tx);
    }
    events
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    if view_data.stage_picker.visible {
        handle_stage_picker_key(state, view_data, internal_tx, key);
        return false;
    }

    match state.mode {
        AppMode::Detail(_) => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
            ) {
                dispatch_and_sync(state, view_data, internal_tx, AppCommand::CloseDetail);
            }
            false
        }
        AppMode::Filter => {
            handle_filter_form_key(state, view_data, internal_tx, key);
            false
        }
        AppMode::Edit(cell) => {
            handle_inline_edit_key(state, view_data, internal_tx, cell, key);
            false
        }
        AppMode::Nav => {
            handle_nav_key(state, view_data, internal_tx, key);
            false
        }
    }
}

fn handle_nav_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if let Some(command) = table_command_for_key(key) {
        apply_table_command(state, view_data, command);
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => activate_cursor_cell(state, view_data, internal_tx),
        (KeyCode::Char(' '), _) => {
            if let Some(id) = cursor_candidate_id(state, view_data) {
                dispatch_and_sync(state, view_data, internal_tx, AppCommand::ToggleSelect(id));
            }
        }
        (KeyCode::Char('v'), KeyModifiers::NONE) => {
            if let Some(id) = cursor_candidate_id(state, view_data) {
                toggle_jobs(state, view_data, internal_tx, id);
            }
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) => {
            begin_edit_at_cursor(state, view_data, internal_tx);
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => sort_by_column(
            state,
            view_data,
            internal_tx,
            cursor_column(view_data),
        ),
        (KeyCode::Char('S'), _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ClearSort);
        }
        (KeyCode::Char('/'), _) => {
            view_data.filter_field = 0;
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::OpenFilterForm);
        }
        (KeyCode::Char('X'), _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ClearFilters);
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::SelectVisible);
        }
        (KeyCode::Char('A'), _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ClearSelection);
        }
        (KeyCode::Char('b'), KeyModifiers::NONE) => {
            if state.selection().is_empty() {
                emit_status(state, view_data, internal_tx, "nothing selected");
            } else {
                view_data.stage_picker = StagePickerUiState {
                    visible: true,
                    cursor: 0,
                };
            }
        }
        (KeyCode::Char('m'), KeyModifiers::NONE) => {
            dispatch_and_sync(
                state,
                view_data,
                internal_tx,
                AppCommand::BulkSet(FieldUpdate::Reviewed(true)),
            );
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
        }
        _ => {}
    }
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveHalfPageDown)
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveHalfPageUp)
        }
        (KeyCode::PageDown, _) => Some(TableCommand::MoveFullPageDown),
        (KeyCode::PageUp, _) => Some(TableCommand::MoveFullPageUp),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('^'), _) => Some(TableCommand::JumpFirstColumn),
        (KeyCode::Char('$'), _) => Some(TableCommand::JumpLastColumn),
        _ => None,
    }
}

fn apply_table_command(state: &AppState, view_data: &mut ViewData, command: TableCommand) {
    let page = view_data.window.page_size() as isize;
    match command {
        TableCommand::MoveRow(delta) => move_row(state, view_data, delta),
        TableCommand::MoveColumn(delta) => move_col(view_data, delta),
        TableCommand::MoveHalfPageDown => move_row(state, view_data, (page / 2).max(1)),
        TableCommand::MoveHalfPageUp => move_row(state, view_data, -(page / 2).max(1)),
        TableCommand::MoveFullPageDown => move_row(state, view_data, page),
        TableCommand::MoveFullPageUp => move_row(state, view_data, -page),
        TableCommand::JumpFirstRow => {
            view_data.cursor_row = 0;
            clamp_cursor(state, view_data);
        }
        TableCommand::JumpLastRow => {
            view_data.cursor_row = state.visible_len().saturating_sub(1);
            clamp_cursor(state, view_data);
        }
        TableCommand::JumpFirstColumn => view_data.cursor_col = 0,
        TableCommand::JumpLastColumn => view_data.cursor_col = Column::ALL.len() - 1,
    }
}

fn move_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let current = view_data.cursor_row;
    view_data.cursor_row = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs())
    };
    clamp_cursor(state, view_data);
}

fn move_col(view_data: &mut ViewData, delta: isize) {
    let current = view_data.cursor_col;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs())
    };
    view_data.cursor_col = next.min(Column::ALL.len() - 1);
}

fn clamp_cursor(state: &AppState, view_data: &mut ViewData) {
    let len = state.visible_len();
    view_data.cursor_row = view_data.cursor_row.min(len.saturating_sub(1));
    view_data.window.clamp(len);
    view_data.window.scroll_to_include(view_data.cursor_row, len);
}

fn cursor_column(view_data: &ViewData) -> Column {
    Column::ALL[view_data.cursor_col.min(Column::ALL.len() - 1)]
}

fn cursor_candidate_id(state: &AppState, view_data: &ViewData) -> Option<CandidateId> {
    state
        .visible_candidate(view_data.cursor_row)
        .map(|candidate| candidate.id)
}

fn activate_cursor_cell(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(candidate) = state.visible_candidate(view_data.cursor_row) else {
        emit_status(state, view_data, internal_tx, "no candidate under cursor");
        return;
    };
    let id = candidate.id;
    let command = match row_click_action(cursor_column(view_data), candidate) {
        RowAction::ToggleSelect => AppCommand::ToggleSelect(id),
        RowAction::BeginEdit(field) => AppCommand::BeginEdit(CellKey::new(id, field)),
        RowAction::OpenDetail => AppCommand::OpenDetail(id),
        RowAction::ToggleJobs => {
            toggle_jobs(state, view_data, internal_tx, id);
            return;
        }
    };
    dispatch_and_sync(state, view_data, internal_tx, command);
}

fn toggle_jobs(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: CandidateId,
) {
    let collapsible = state
        .dataset()
        .get(id)
        .is_some_and(|candidate| candidate.jobs_associated.len() > JOBS_COLLAPSED_COUNT);
    if !collapsible {
        emit_status(state, view_data, internal_tx, "all jobs already shown");
        return;
    }
    let status = if view_data.expanded_jobs.remove(&id) {
        "jobs collapsed"
    } else {
        view_data.expanded_jobs.insert(id);
        "jobs expanded"
    };
    emit_status(state, view_data, internal_tx, status);
}

fn begin_edit_at_cursor(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let column = cursor_column(view_data);
    let Some(field) = column.editable_field() else {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{} is not editable", column.label()),
        );
        return;
    };
    if let Some(id) = cursor_candidate_id(state, view_data) {
        dispatch_and_sync(
            state,
            view_data,
            internal_tx,
            AppCommand::BeginEdit(CellKey::new(id, field)),
        );
    }
}

fn sort_by_column(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    column: Column,
) {
    match column.sort_key() {
        Some(key) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ToggleSort(key));
        }
        None => emit_status(
            state,
            view_data,
            internal_tx,
            format!("sort unavailable: {}", column.label()),
        ),
    }
}

fn handle_stage_picker_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let chosen = match key.code {
        KeyCode::Esc => {
            view_data.stage_picker = StagePickerUiState::default();
            emit_status(state, view_data, internal_tx, "bulk stage canceled");
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.stage_picker.cursor =
                (view_data.stage_picker.cursor + 1).min(Stage::ALL.len() - 1);
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.stage_picker.cursor = view_data.stage_picker.cursor.saturating_sub(1);
            return;
        }
        KeyCode::Enter => Stage::ALL.get(view_data.stage_picker.cursor).copied(),
        KeyCode::Char(digit) => {
            digit_choice(digit).and_then(|index| Stage::ALL.get(index).copied())
        }
        _ => None,
    };

    let Some(stage) = chosen else {
        return;
    };
    view_data.stage_picker = StagePickerUiState::default();
    dispatch_and_sync(
        state,
        view_data,
        internal_tx,
        AppCommand::BulkSet(FieldUpdate::CurrentStage(stage)),
    );
}

/// `'1'` maps to index 0; `'0'` and non-digits map to nothing.
fn digit_choice(ch: char) -> Option<usize> {
    let digit = ch.to_digit(10)? as usize;
    digit.checked_sub(1)
}

fn handle_filter_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = FilterField::ALL[view_data.filter_field.min(FilterField::ALL.len() - 1)];
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::CloseFilterForm);
        }
        (KeyCode::Enter, _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ApplyFilters);
        }
        (KeyCode::Char('x'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ClearFilters);
        }
        (KeyCode::Tab, _) | (KeyCode::Down, _) => move_filter_field(view_data, 1),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => move_filter_field(view_data, -1),
        (KeyCode::Left, _) if field.is_choice() => state.filter_form.cycle_choice(field, -1),
        (KeyCode::Right, _) if field.is_choice() => state.filter_form.cycle_choice(field, 1),
        (KeyCode::Char(ch), _) if field.is_choice() => {
            let Some(choice) = ch.to_digit(10) else {
                return;
            };
            if !state.filter_form.choose(field, choice as usize) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("{}: no option {choice}", field.label()),
                );
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(text) = state.filter_form.text_mut(field) {
                text.pop();
            }
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = state.filter_form.text_mut(field) {
                text.push(ch);
            }
        }
        _ => {}
    }
}

fn move_filter_field(view_data: &mut ViewData, delta: isize) {
    let len = FilterField::ALL.len() as isize;
    let next = (view_data.filter_field as isize + delta).rem_euclid(len);
    view_data.filter_field = next as usize;
}

fn handle_inline_edit_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    cell: CellKey,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::CancelEdit);
            emit_status(state, view_data, internal_tx, "edit canceled");
            return;
        }
        (KeyCode::Enter, _) | (KeyCode::Tab, _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::CommitEdit);
            return;
        }
        _ => {}
    }

    let edits = state.inline_mut();
    match cell.field {
        EditableField::Stage => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                edits.cycle_option(cell, -1);
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                edits.cycle_option(cell, 1);
            }
            KeyCode::Char(digit) => {
                if let Some(stage) =
                    digit_choice(digit).and_then(|index| Stage::ALL.get(index).copied())
                {
                    edits.choose_stage(cell, stage);
                }
            }
            _ => {}
        },
        EditableField::ExpectedSalary => match (key.code, key.modifiers) {
            (KeyCode::Backspace, _) => edits.backspace(cell),
            (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                edits.set_text(cell, "");
            }
            (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                edits.push_char(cell, ch);
            }
            _ => {}
        },
    }
}

fn handle_mouse_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    if view_data.help_visible || view_data.stage_picker.visible {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown if state.mode == AppMode::Nav => {
            move_row(state, view_data, MOUSE_SCROLL_ROWS);
        }
        MouseEventKind::ScrollUp if state.mode == AppMode::Nav => {
            move_row(state, view_data, -MOUSE_SCROLL_ROWS);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            handle_click(state, view_data, internal_tx, mouse.column, mouse.row);
        }
        _ => {}
    }
}

fn handle_click(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    x: u16,
    y: u16,
) {
    match state.mode {
        AppMode::Detail(_) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::CloseDetail);
            return;
        }
        AppMode::Filter => return,
        // Clicking away from an open editor commits it.
        AppMode::Edit(_) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::CommitEdit);
        }
        AppMode::Nav => {}
    }

    match table_hit(view_data, x, y, state.visible_len()) {
        Some(TableHit::Header(column)) => sort_by_column(state, view_data, internal_tx, column),
        Some(TableHit::Cell { position, column }) => {
            view_data.cursor_row = position;
            view_data.cursor_col = Column::ALL
                .iter()
                .position(|candidate| *candidate == column)
                .unwrap_or(0);
            clamp_cursor(state, view_data);
            activate_cursor_cell(state, view_data, internal_tx);
        }
        None => {}
    }
}

fn table_hit(view_data: &ViewData, x: u16, y: u16, len: usize) -> Option<TableHit> {
    let inner = table_block().inner(screen_layout(view_data.screen).table);
    if x < inner.x || x >= inner.right() || y < inner.y || y >= inner.bottom() {
        return None;
    }
    let column = column_at_offset(x - inner.x, inner.width)?;
    if y == inner.y {
        return Some(TableHit::Header(column));
    }
    let position = view_data.window.position_at_line(y - inner.y - 1, len)?;
    Some(TableHit::Cell { position, column })
}

fn column_widths() -> impl Iterator<Item = Constraint> {
    Column::ALL
        .iter()
        .map(|column| Constraint::Length(column.width()))
}

/// Solves column positions the same way the table widget does, so clicks
/// land on the rendered cell even when a narrow terminal squeezes columns.
fn column_at_offset(offset: u16, width: u16) -> Option<Column> {
    let rects = Layout::horizontal(column_widths())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(0, 0, width, 1));
    Column::ALL
        .iter()
        .zip(rects.iter())
        .find(|(_, rect)| offset >= rect.x && offset < rect.right())
        .map(|(column, _)| *column)
}

fn screen_layout(area: Rect) -> ScreenLayout {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);
    ScreenLayout {
        top: layout[0],
        table: layout[1],
        footer: layout[2],
    }
}

fn table_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Records the terminal area and resizes the row window to the table body.
fn sync_viewport(state: &AppState, view_data: &mut ViewData, area: Rect) {
    view_data.screen = area;
    let body = table_block().inner(screen_layout(area).table);
    view_data
        .window
        .set_viewport_height(body.height.saturating_sub(1));
    clamp_cursor(state, view_data);
}

fn windowed_rows<'a>(state: &'a AppState, view_data: &ViewData) -> Vec<(usize, &'a Candidate)> {
    view_data
        .window
        .visible_range(state.visible_len())
        .filter_map(|position| {
            state
                .visible_candidate(position)
                .map(|candidate| (position, candidate))
        })
        .collect()
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = screen_layout(frame.area());

    let summary = Paragraph::new(summary_text(state))
        .block(Block::default().title("roster").borders(Borders::ALL));
    frame.render_widget(summary, layout.top);

    render_table(frame, layout.table, state, view_data);

    let footer = Paragraph::new(format!(
        "{}\n{}",
        footer_text(state, view_data),
        status_text(state, view_data)
    ))
    .style(Style::default().fg(Color::Yellow))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, layout.footer);

    if state.mode == AppMode::Filter {
        let area = centered_rect(56, 50, frame.area());
        frame.render_widget(Clear, area);
        let form = Paragraph::new(render_filter_form_text(state, view_data))
            .block(Block::default().title("filters").borders(Borders::ALL));
        frame.render_widget(form, area);
    }

    if let AppMode::Detail(id) = state.mode
        && let Some(candidate) = state.dataset().get(id)
    {
        let area = centered_rect(64, 60, frame.area());
        frame.render_widget(Clear, area);
        let detail = Paragraph::new(render_detail_text(candidate)).block(
            Block::default()
                .title(id.to_string())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(detail, area);
    }

    if view_data.stage_picker.visible {
        let area = centered_rect(36, 45, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(render_stage_picker_text(state, view_data))
            .block(Block::default().title("bulk stage").borders(Borders::ALL));
        frame.render_widget(picker, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let block = table_block().title(table_title(state));
    if state.visible_len() == 0 {
        let empty = Paragraph::new(EMPTY_STATE_TEXT)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let sort = state.sort();
    let header = Row::new(Column::ALL.iter().map(|column| {
        Cell::from(header_label(*column, sort)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let editing = state.editing_cell();
    let rows = windowed_rows(state, view_data)
        .into_iter()
        .map(|(position, candidate)| {
            let selected = state.selection().is_selected(candidate.id);
            let expanded = view_data.expanded_jobs.contains(&candidate.id);
            let cursor_row = position == view_data.cursor_row;

            let cells = Column::ALL
                .iter()
                .zip(project_row(candidate, selected, expanded))
                .enumerate()
                .map(|(column_index, (column, text))| {
                    let mut style = Style::default();
                    if selected {
                        style = style.fg(Color::Green);
                    }
                    if cursor_row {
                        style = style.bg(Color::DarkGray);
                    }
                    if cursor_row && column_index == view_data.cursor_col {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    if let Some(cell) = editing
                        && cell.id == candidate.id
                        && column.editable_field() == Some(cell.field)
                        && let CellState::Editing(draft) = state.inline().state(cell)
                    {
                        return Cell::from(draft_label(draft)).style(
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                    Cell::from(text).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells).height(view_data.window.row_height())
        });

    let table = Table::new(rows, column_widths())
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .block(block);
    frame.render_widget(table, area);
}

fn header_label(column: Column, sort: SortSpec) -> String {
    let mut label = column.label().to_owned();
    if let Some(key) = column.sort_key()
        && sort.key == Some(key)
    {
        label.push_str(match sort.direction {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        });
    }
    label
}

fn draft_label(draft: &Draft) -> String {
    match draft {
        Draft::Stage(_) => format!("‹ {} ›", draft.display()),
        Draft::Salary(_) => format!("{}_", draft.display()),
    }
}

fn table_title(state: &AppState) -> String {
    let total = state.dataset().len();
    let visible = state.visible_len();
    if visible == total {
        format!("candidates ({total})")
    } else {
        format!("candidates ({visible} of {total})")
    }
}

fn summary_text(state: &AppState) -> String {
    let sort = match state.sort().key {
        Some(key) => format!("{} {}", key.label(), direction_label(state.sort().direction)),
        None => "none".to_owned(),
    };
    format!(
        "filters: {} | sort: {sort}",
        filter_summary(state.applied_filters())
    )
}

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}

fn filter_summary(criteria: Option<&FilterCriteria>) -> String {
    let Some(criteria) = criteria.filter(|criteria| !criteria.is_empty()) else {
        return "none".to_owned();
    };
    let mut parts = Vec::with_capacity(criteria.active_count());
    if let Some(name) = &criteria.name {
        parts.push(format!("name~{name:?}"));
    }
    if let Some(company) = criteria.company {
        parts.push(format!("company={}", company.as_str()));
    }
    if let Some(stage) = criteria.stage {
        parts.push(format!("stage={}", stage.as_str()));
    }
    if let Some(min) = criteria.min_salary {
        parts.push(format!("salary>={}", format_salary(min)));
    }
    if let Some(max) = criteria.max_salary {
        parts.push(format!("salary<={}", format_salary(max)));
    }
    parts.join(" ")
}

fn showing_text(range: Range<usize>, total: usize) -> String {
    if range.is_empty() {
        return format!("showing 0 of {total} candidates");
    }
    format!(
        "showing {}-{} of {total} candidates",
        range.start + 1,
        range.end
    )
}

fn footer_text(state: &AppState, view_data: &ViewData) -> String {
    let len = state.visible_len();
    format!(
        "{} selected | {}",
        state.selection().len(),
        showing_text(view_data.window.visible_range(len), len)
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let hints = if view_data.stage_picker.visible {
        "j/k move | 1-6 or enter apply | esc cancel"
    } else {
        match state.mode {
            AppMode::Nav => {
                "j/k/h/l g/G pg | enter open | space sel | v jobs | e edit | s/S sort | / filter X clear | a/A sel | b stage | m reviewed | ? | ctrl+q"
            }
            AppMode::Filter => {
                "tab field | type or ←/→ 0-9 | enter search | ctrl+x clear | esc close"
            }
            AppMode::Edit(_) => "type or ←/→ 1-6 | enter/tab save | esc cancel",
            AppMode::Detail(_) => "esc/enter/q close",
        }
    };
    let mode = mode_label(state.mode);
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn mode_label(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Nav => "NAV",
        AppMode::Filter => "FILTER",
        AppMode::Edit(_) => "EDIT",
        AppMode::Detail(_) => "DETAIL",
    }
}

fn render_filter_form_text(state: &AppState, view_data: &ViewData) -> String {
    let mut lines = FilterField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == view_data.filter_field;
            let marker = if focused { ">" } else { " " };
            let mut value = state.filter_form.display_value(*field);
            if focused && !field.is_choice() {
                value.push('_');
            }
            format!("{marker} {:<12}{value}", format!("{}:", field.label()))
        })
        .collect::<Vec<_>>();

    lines.push(String::new());
    lines.push(format!(
        "applied: {}",
        filter_summary(state.applied_filters())
    ));
    if state.applied_filters().cloned().unwrap_or_default() != state.filter_form.criteria() {
        lines.push("draft differs; enter to search".to_owned());
    }
    lines.join("\n")
}

fn render_detail_text(candidate: &Candidate) -> String {
    let mut lines = vec![
        candidate.name.clone(),
        format!("{} • {}", candidate.email, candidate.mobile),
        String::new(),
        "jobs".to_owned(),
    ];
    lines.extend(
        candidate
            .jobs_associated
            .iter()
            .map(|job| format!("  - {}", job.label())),
    );
    lines.push(String::new());
    lines.push("education".to_owned());
    lines.push(format!(
        "  {}",
        candidate
            .education
            .iter()
            .map(|education| education.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.push(String::new());
    lines.push(format!(
        "stage: {} | company: {} | exp salary: {} | applied: {} | reviewed: {}",
        candidate.current_stage.as_str(),
        candidate.current_company.as_str(),
        format_salary(candidate.expected_salary),
        candidate.applied_date,
        if candidate.reviewed { "yes" } else { "no" }
    ));
    lines.join("\n")
}

fn render_stage_picker_text(state: &AppState, view_data: &ViewData) -> String {
    let mut lines = vec![
        format!("set stage for {} selected", state.selection().len()),
        String::new(),
    ];
    lines.extend(Stage::ALL.iter().enumerate().map(|(index, stage)| {
        let marker = if index == view_data.stage_picker.cursor {
            ">"
        } else {
            " "
        };
        format!("{marker} {} {}", index + 1, stage.as_str())
    }));
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k/h/l move | g/G first/last | ^/$ first/last col | ctrl+d/u half page | pgup/pgdn page\n\
nav: enter open/toggle/edit cell | space select | v jobs more/less | e edit stage/salary\n\
nav: s sort column (again flips) | S clear sort | / filters | X clear filters\n\
bulk: a select visible | A clear selection | b set stage | m mark reviewed\n\
filters: tab/shift+tab field | type text | ←/→ or 0-9 choose | enter search | ctrl+x clear | esc close\n\
edit: type digits | ctrl+u clear | ←/→ or 1-6 stage | enter/tab save | esc cancel\n\
detail: esc/enter/q close\n\
mouse: click header to sort | click cell to activate | wheel scroll"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
