// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }
    };
}

entity_id!(CandidateId, "cand");

/// Job associations are numbered per candidate, so the owning id is part
/// of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobAssociationId {
    candidate: CandidateId,
    ordinal: u8,
}

impl JobAssociationId {
    pub const fn new(candidate: CandidateId, ordinal: u8) -> Self {
        Self { candidate, ordinal }
    }

    pub const fn candidate(self) -> CandidateId {
        self.candidate
    }

    pub const fn ordinal(self) -> u8 {
        self.ordinal
    }
}

impl fmt::Display for JobAssociationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-job-{}", self.candidate, self.ordinal)
    }
}
