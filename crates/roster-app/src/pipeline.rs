// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::{Candidate, Company, SortDirection, SortKey, SortSpec, Stage};

/// Committed filter set. Every present field is one predicate; predicates
/// combine with AND.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub company: Option<Company>,
    pub stage: Option<Stage>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company.is_none()
            && self.stage.is_none()
            && self.min_salary.is_none()
            && self.max_salary.is_none()
    }

    pub fn active_count(&self) -> usize {
        [
            self.name.is_some(),
            self.company.is_some(),
            self.stage.is_some(),
            self.min_salary.is_some(),
            self.max_salary.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(needle) = &self.name
            && !candidate
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if let Some(company) = self.company
            && candidate.current_company != company
        {
            return false;
        }
        if let Some(stage) = self.stage
            && candidate.current_stage != stage
        {
            return false;
        }
        if let Some(min) = self.min_salary
            && candidate.expected_salary < min
        {
            return false;
        }
        if let Some(max) = self.max_salary
            && candidate.expected_salary > max
        {
            return false;
        }
        true
    }
}

/// Dataset positions of the visible sequence, in display order. The dataset
/// itself is never reordered.
pub fn visible_indices(
    dataset: &[Candidate],
    filters: Option<&FilterCriteria>,
    sort: SortSpec,
) -> Vec<usize> {
    let mut indices = match filters {
        Some(filters) => dataset
            .iter()
            .enumerate()
            .filter(|(_, candidate)| filters.matches(candidate))
            .map(|(index, _)| index)
            .collect::<Vec<_>>(),
        None => (0..dataset.len()).collect(),
    };

    if let Some(key) = sort.key {
        // sort_by is stable, so equal keys keep dataset order in both directions.
        indices.sort_by(|left, right| {
            let ordering = compare_by_key(&dataset[*left], &dataset[*right], key);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    indices
}

pub fn compare_by_key(left: &Candidate, right: &Candidate, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(&left.name, &right.name),
        SortKey::Email => compare_text(&left.email, &right.email),
        SortKey::Company => {
            compare_text(left.current_company.as_str(), right.current_company.as_str())
        }
        SortKey::Stage => compare_text(left.current_stage.as_str(), right.current_stage.as_str()),
        SortKey::ExpectedSalary => left.expected_salary.cmp(&right.expected_salary),
        SortKey::AppliedDate => left.applied_date.cmp(&right.applied_date),
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VisibleKey {
    revision: u64,
    filters: Option<FilterCriteria>,
    sort: SortSpec,
}

/// Memoized visible sequence. Recomputed only when the dataset revision,
/// the applied filters or the sort spec differ from the last derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSequence {
    key: Option<VisibleKey>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl VisibleSequence {
    /// Returns true when the sequence was recomputed.
    pub fn ensure(
        &mut self,
        dataset: &[Candidate],
        revision: u64,
        filters: Option<&FilterCriteria>,
        sort: SortSpec,
    ) -> bool {
        let key = VisibleKey {
            revision,
            filters: filters.cloned(),
            sort,
        };
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        self.indices = visible_indices(dataset, filters, sort);
        self.key = Some(key);
        self.recomputations = self.recomputations.saturating_add(1);
        tracing::debug!(
            revision,
            visible = self.indices.len(),
            total = dataset.len(),
            "visible sequence recomputed"
        );
        true
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterCriteria, VisibleSequence, visible_indices};
    use crate::{
        Candidate, CandidateId, Company, Education, JobAssociation, JobAssociationId, JobTitle,
        SortDirection, SortKey, SortSpec, Stage,
    };
    use time::{Date, Month};

    fn candidate(id: i64, name: &str, company: Company, stage: Stage, salary: i64) -> Candidate {
        let candidate_id = CandidateId::new(id);
        Candidate {
            id: candidate_id,
            name: name.to_owned(),
            email: format!("candidate{id}@example.com"),
            mobile: "+916000000000".to_owned(),
            jobs_associated: vec![JobAssociation {
                id: JobAssociationId::new(candidate_id, 0),
                title: JobTitle::BackendEngineer,
                company,
            }],
            current_stage: stage,
            current_company: company,
            education: vec![Education::BTech],
            applied_date: Date::from_calendar_date(2026, Month::January, id as u8)
                .expect("valid date"),
            expected_salary: salary,
            reviewed: false,
        }
    }

    fn dataset() -> Vec<Candidate> {
        vec![
            candidate(1, "Asha Rao", Company::Google, Stage::Applied, 300_000),
            candidate(2, "bina shah", Company::Meta, Stage::Offer, 500_000),
            candidate(3, "Chetan Das", Company::Google, Stage::Offer, 400_000),
            candidate(4, "ASHWIN Iyer", Company::Bose, Stage::Interview, 400_000),
        ]
    }

    fn sort(key: SortKey, direction: SortDirection) -> SortSpec {
        SortSpec {
            key: Some(key),
            direction,
        }
    }

    #[test]
    fn absent_filters_preserve_dataset_order() {
        let data = dataset();
        assert_eq!(
            visible_indices(&data, None, SortSpec::default()),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn empty_criteria_match_everything() {
        let data = dataset();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(
            visible_indices(&data, Some(&criteria), SortSpec::default()),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn name_filter_is_case_insensitive_containment() {
        let data = dataset();
        let criteria = FilterCriteria {
            name: Some("ash".to_owned()),
            ..FilterCriteria::default()
        };
        assert_eq!(
            visible_indices(&data, Some(&criteria), SortSpec::default()),
            vec![0, 3]
        );
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let data = dataset();
        let criteria = FilterCriteria {
            company: Some(Company::Google),
            stage: Some(Stage::Offer),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.active_count(), 2);
        assert_eq!(
            visible_indices(&data, Some(&criteria), SortSpec::default()),
            vec![2]
        );
    }

    #[test]
    fn salary_bounds_are_inclusive() {
        let data = dataset();
        let criteria = FilterCriteria {
            min_salary: Some(400_000),
            max_salary: Some(500_000),
            ..FilterCriteria::default()
        };
        assert_eq!(
            visible_indices(&data, Some(&criteria), SortSpec::default()),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn text_sort_ignores_case() {
        let data = dataset();
        assert_eq!(
            visible_indices(&data, None, sort(SortKey::Name, SortDirection::Asc)),
            vec![0, 3, 1, 2]
        );
    }

    #[test]
    fn numeric_sort_keeps_ties_in_dataset_order_both_ways() {
        let data = dataset();
        assert_eq!(
            visible_indices(&data, None, sort(SortKey::ExpectedSalary, SortDirection::Asc)),
            vec![0, 2, 3, 1]
        );
        assert_eq!(
            visible_indices(&data, None, sort(SortKey::ExpectedSalary, SortDirection::Desc)),
            vec![1, 2, 3, 0]
        );
    }

    #[test]
    fn sorting_applies_without_filters_and_leaves_dataset_untouched() {
        let data = dataset();
        let before = data.clone();
        let _ = visible_indices(&data, None, sort(SortKey::Stage, SortDirection::Asc));
        assert_eq!(data, before);
    }

    #[test]
    fn memo_recomputes_only_on_input_change() {
        let data = dataset();
        let mut visible = VisibleSequence::default();
        let criteria = FilterCriteria {
            stage: Some(Stage::Offer),
            ..FilterCriteria::default()
        };

        assert!(visible.ensure(&data, 0, Some(&criteria), SortSpec::default()));
        assert!(!visible.ensure(&data, 0, Some(&criteria), SortSpec::default()));
        assert_eq!(visible.indices(), &[1, 2]);
        assert_eq!(visible.recomputations(), 1);

        assert!(visible.ensure(&data, 1, Some(&criteria), SortSpec::default()));
        assert!(visible.ensure(
            &data,
            1,
            Some(&criteria),
            sort(SortKey::ExpectedSalary, SortDirection::Asc)
        ));
        assert_eq!(visible.indices(), &[2, 1]);
        assert!(visible.ensure(&data, 1, None, SortSpec::default()));
        assert_eq!(visible.len(), 4);
        assert_eq!(visible.recomputations(), 4);
    }
}
