// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use roster_app::{
    Candidate, CandidateFaker, CandidateId, Company, Dataset, Education, JobAssociation,
    JobAssociationId, JobTitle, Stage,
};
use std::path::PathBuf;
use time::{Date, Month};

const REFERENCE_YEAR: i32 = 2026;

/// Fixed "today" for generated datasets so applied dates are stable.
pub fn reference_date() -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::February, 19).expect("valid calendar date")
}

/// Hand-built candidate with predictable fields. Everything besides the
/// name and salary is fixed so tests can assert on ordering precisely.
pub fn candidate(id: i64, name: &str, salary: i64) -> Candidate {
    let candidate_id = CandidateId::new(id);
    Candidate {
        id: candidate_id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        mobile: format!("+91{}", 9_000_000_000_i64 + id),
        jobs_associated: vec![JobAssociation {
            id: JobAssociationId::new(candidate_id, 0),
            title: JobTitle::BackendEngineer,
            company: Company::Fractal,
        }],
        current_stage: Stage::Applied,
        current_company: Company::Google,
        education: vec![Education::BTech],
        applied_date: reference_date(),
        expected_salary: salary,
        reviewed: false,
    }
}

/// Candidates `1..=n` named `Candidate N`, one per salary, in order.
pub fn candidates_with_salaries(salaries: &[i64]) -> Vec<Candidate> {
    salaries
        .iter()
        .zip(1_i64..)
        .map(|(salary, id)| candidate(id, &format!("Candidate {id}"), *salary))
        .collect()
}

pub fn dataset_with_salaries(salaries: &[i64]) -> Dataset {
    Dataset::new(candidates_with_salaries(salaries))
}

pub fn seeded_candidates(count: usize, seed: u64) -> Vec<Candidate> {
    CandidateFaker::new(seed).candidates(count, reference_date())
}

pub fn seeded_dataset(count: usize, seed: u64) -> Dataset {
    Dataset::new(seeded_candidates(count, seed))
}

pub fn temp_config_file(contents: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents)
        .with_context(|| format!("write config fixture {}", path.display()))?;
    Ok((dir, path))
}

pub fn temp_log_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("logs").join("roster.log");
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::{
        candidate, candidates_with_salaries, dataset_with_salaries, reference_date,
        seeded_candidates, temp_config_file, temp_log_path,
    };
    use roster_app::CandidateId;

    #[test]
    fn candidate_fixture_is_predictable() {
        let fixture = candidate(7, "Asha Rao", 410_000);
        assert_eq!(fixture.id, CandidateId::new(7));
        assert_eq!(fixture.email, "asha.rao@example.com");
        assert_eq!(fixture.mobile, "+919000000007");
        assert_eq!(fixture.expected_salary, 410_000);
        assert_eq!(fixture.applied_date, reference_date());
    }

    #[test]
    fn salaries_map_to_sequential_ids() {
        let fixtures = candidates_with_salaries(&[300_000, 400_000, 500_000]);
        let ids = fixtures.iter().map(|c| c.id.get()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(fixtures[2].name, "Candidate 3");
        assert_eq!(dataset_with_salaries(&[1, 2]).len(), 2);
    }

    #[test]
    fn seeded_candidates_are_reproducible() {
        assert_eq!(seeded_candidates(20, 4), seeded_candidates(20, 4));
    }

    #[test]
    fn temp_config_file_round_trips_contents() {
        let (_dir, path) = temp_config_file("version = 1\n").expect("fixture");
        let contents = std::fs::read_to_string(path).expect("read back");
        assert_eq!(contents, "version = 1\n");
    }

    #[test]
    fn temp_log_path_lives_in_missing_subdirectory() {
        let (dir, path) = temp_log_path().expect("fixture");
        assert!(path.starts_with(dir.path()));
        assert!(!path.exists());
    }
}
