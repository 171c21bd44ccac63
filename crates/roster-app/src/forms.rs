// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::validation::parse_salary_bound;
use crate::{Company, FilterCriteria, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Company,
    Stage,
    MinSalary,
    MaxSalary,
}

impl FilterField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Company,
        Self::Stage,
        Self::MinSalary,
        Self::MaxSalary,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Company => "company",
            Self::Stage => "stage",
            Self::MinSalary => "min salary",
            Self::MaxSalary => "max salary",
        }
    }

    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Company | Self::Stage)
    }
}

/// Draft behind the filter panel. Editing it never changes the visible
/// sequence; only [`FilterForm::criteria`] handed to a Search commit does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterForm {
    pub name: String,
    pub company: Option<Company>,
    pub stage: Option<Stage>,
    pub min_salary: String,
    pub max_salary: String,
}

impl FilterForm {
    /// Whitespace-only text and unparseable salary bounds become absent
    /// predicates. Any other name is matched exactly as typed.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            name: (!self.name.trim().is_empty()).then(|| self.name.clone()),
            company: self.company,
            stage: self.stage,
            min_salary: parse_salary_bound(&self.min_salary),
            max_salary: parse_salary_bound(&self.max_salary),
        }
    }

    pub fn text_mut(&mut self, field: FilterField) -> Option<&mut String> {
        match field {
            FilterField::Name => Some(&mut self.name),
            FilterField::MinSalary => Some(&mut self.min_salary),
            FilterField::MaxSalary => Some(&mut self.max_salary),
            FilterField::Company | FilterField::Stage => None,
        }
    }

    /// Steps a choice field through "any" followed by every option.
    pub fn cycle_choice(&mut self, field: FilterField, delta: isize) {
        match field {
            FilterField::Company => {
                self.company = cycle_optional(&Company::ALL, self.company, delta);
            }
            FilterField::Stage => self.stage = cycle_optional(&Stage::ALL, self.stage, delta),
            FilterField::Name | FilterField::MinSalary | FilterField::MaxSalary => {}
        }
    }

    /// `0` selects "any", `1..=N` selects the N-th option.
    pub fn choose(&mut self, field: FilterField, choice: usize) -> bool {
        match field {
            FilterField::Company => choose_optional(&Company::ALL, &mut self.company, choice),
            FilterField::Stage => choose_optional(&Stage::ALL, &mut self.stage, choice),
            FilterField::Name | FilterField::MinSalary | FilterField::MaxSalary => false,
        }
    }

    pub fn display_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Name => self.name.clone(),
            FilterField::Company => self
                .company
                .map_or_else(|| "-- any --".to_owned(), |c| c.as_str().to_owned()),
            FilterField::Stage => self
                .stage
                .map_or_else(|| "-- any --".to_owned(), |s| s.as_str().to_owned()),
            FilterField::MinSalary => self.min_salary.clone(),
            FilterField::MaxSalary => self.max_salary.clone(),
        }
    }
}

fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>, delta: isize) -> Option<T> {
    // Slot 0 is "any"; slots 1..=len map to options.
    let slots = all.len() as isize + 1;
    let position = current
        .and_then(|value| all.iter().position(|item| *item == value))
        .map_or(0, |index| index as isize + 1);
    match (position + delta).rem_euclid(slots) {
        0 => None,
        slot => Some(all[(slot - 1) as usize]),
    }
}

fn choose_optional<T: Copy>(all: &[T], target: &mut Option<T>, choice: usize) -> bool {
    match choice {
        0 => {
            *target = None;
            true
        }
        n if n <= all.len() => {
            *target = Some(all[n - 1]);
            true
        }
        _ => false,
    }
}
