// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::{Date, Duration};

use crate::{
    Candidate, CandidateId, Company, Education, JobAssociation, JobAssociationId, JobTitle, Stage,
};

pub const DEFAULT_CANDIDATE_COUNT: usize = 10_000;

pub const SALARY_BASE: i64 = 300_000;
pub const SALARY_STEP: i64 = 10_000;
pub const SALARY_MAX_STEPS: i64 = 70;
pub const APPLIED_WITHIN_DAYS: i64 = 365;

const MOBILE_MIN: u64 = 6_000_000_000;
const MOBILE_MAX: u64 = 9_999_999_999;
const REVIEWED_PROBABILITY: f64 = 0.2;

/// Synthetic candidate source. Seeded fakers are reproducible, which the
/// tests rely on; the app itself starts from OS entropy unless a seed is
/// configured.
#[derive(Debug, Clone)]
pub struct CandidateFaker {
    rng: StdRng,
}

impl CandidateFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Builds `count` candidates with ids `1..=count`, applied dates within
    /// the year before `today`.
    pub fn candidates(&mut self, count: usize, today: Date) -> Vec<Candidate> {
        (1..=count as i64)
            .map(|id| self.candidate(CandidateId::new(id), today))
            .collect()
    }

    pub fn candidate(&mut self, id: CandidateId, today: Date) -> Candidate {
        let n = id.get();
        let jobs_count = self.rng.random_range(1..=4_u8);
        let jobs_associated = (0..jobs_count)
            .map(|ordinal| JobAssociation {
                id: JobAssociationId::new(id, ordinal),
                title: self.pick(&JobTitle::ALL),
                company: self.pick(&Company::ALL),
            })
            .collect();

        let education_count = self.rng.random_range(1..=3_usize);
        let education = (0..education_count)
            .map(|_| self.pick(&Education::ALL))
            .collect();

        let expected_salary =
            SALARY_BASE + self.rng.random_range(0..=SALARY_MAX_STEPS) * SALARY_STEP;
        let days_ago = self.rng.random_range(0..=APPLIED_WITHIN_DAYS);
        let applied_date = today
            .checked_sub(Duration::days(days_ago))
            .unwrap_or(today);

        Candidate {
            id,
            name: format!("Candidate {n}"),
            email: format!("candidate{n}@example.com"),
            mobile: format!("+91{}", self.rng.random_range(MOBILE_MIN..=MOBILE_MAX)),
            jobs_associated,
            current_stage: self.pick(&Stage::ALL),
            current_company: self.pick(&Company::ALL),
            education,
            applied_date,
            expected_salary,
            reviewed: self.rng.random_bool(REVIEWED_PROBABILITY),
        }
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.random_range(0..items.len())]
    }
}
