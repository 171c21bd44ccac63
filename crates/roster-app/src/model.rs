// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;

use crate::ids::*;
use crate::inline::CellKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Applied,
    PhoneScreen,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::Applied,
        Self::PhoneScreen,
        Self::Interview,
        Self::Offer,
        Self::Hired,
        Self::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::PhoneScreen => "Phone Screen",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    /// Steps through [`Stage::ALL`], wrapping at both ends.
    pub fn cycle(self, delta: isize) -> Self {
        cycle_in(&Self::ALL, self, delta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Company {
    Google,
    Microsoft,
    Amazon,
    Meta,
    Fractal,
    Bose,
}

impl Company {
    pub const ALL: [Self; 6] = [
        Self::Google,
        Self::Microsoft,
        Self::Amazon,
        Self::Meta,
        Self::Fractal,
        Self::Bose,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Microsoft => "Microsoft",
            Self::Amazon => "Amazon",
            Self::Meta => "Meta",
            Self::Fractal => "Fractal",
            Self::Bose => "Bose",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTitle {
    FrontendEngineer,
    BackendEngineer,
    FullstackEngineer,
    SdeIntern,
    DataScientist,
}

impl JobTitle {
    pub const ALL: [Self; 5] = [
        Self::FrontendEngineer,
        Self::BackendEngineer,
        Self::FullstackEngineer,
        Self::SdeIntern,
        Self::DataScientist,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontendEngineer => "Frontend Engineer",
            Self::BackendEngineer => "Backend Engineer",
            Self::FullstackEngineer => "Fullstack Engineer",
            Self::SdeIntern => "SDE Intern",
            Self::DataScientist => "Data Scientist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Education {
    BTech,
    MTech,
    BSc,
    Mca,
    Phd,
}

impl Education {
    pub const ALL: [Self; 5] = [Self::BTech, Self::MTech, Self::BSc, Self::Mca, Self::Phd];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BTech => "B.Tech",
            Self::MTech => "M.Tech",
            Self::BSc => "B.Sc",
            Self::Mca => "MCA",
            Self::Phd => "PhD",
        }
    }
}

fn cycle_in<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let position = all.iter().position(|item| *item == current).unwrap_or(0) as isize;
    let len = all.len() as isize;
    all[(position + delta).rem_euclid(len) as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAssociation {
    pub id: JobAssociationId,
    pub title: JobTitle,
    pub company: Company,
}

impl JobAssociation {
    pub fn label(&self) -> String {
        format!("{} @ {}", self.title.as_str(), self.company.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub jobs_associated: Vec<JobAssociation>,
    pub current_stage: Stage,
    pub current_company: Company,
    pub education: Vec<Education>,
    pub applied_date: Date,
    pub expected_salary: i64,
    pub reviewed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Email,
    Company,
    Stage,
    ExpectedSalary,
    AppliedDate,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Company,
        Self::Stage,
        Self::ExpectedSalary,
        Self::AppliedDate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Stage => "stage",
            Self::ExpectedSalary => "exp salary",
            Self::AppliedDate => "applied",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    /// Same key flips direction; a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Stage,
    ExpectedSalary,
}

impl EditableField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::ExpectedSalary => "exp salary",
        }
    }
}

/// A single-field replacement. Applying it touches exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    CurrentStage(Stage),
    ExpectedSalary(i64),
    Reviewed(bool),
}

impl FieldUpdate {
    pub const fn field_label(self) -> &'static str {
        match self {
            Self::CurrentStage(_) => "stage",
            Self::ExpectedSalary(_) => "exp salary",
            Self::Reviewed(_) => "reviewed",
        }
    }

    pub fn apply(self, candidate: &mut Candidate) {
        match self {
            Self::CurrentStage(stage) => candidate.current_stage = stage,
            Self::ExpectedSalary(salary) => candidate.expected_salary = salary,
            Self::Reviewed(reviewed) => candidate.reviewed = reviewed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Filter,
    Edit(CellKey),
    Detail(CandidateId),
}
