//! Result of confirming a claim against the registry.

use serde::{Serialize, Serializer};
use std::fmt;

use veridia_types::LandRecord;

use crate::error::QueryError;

/// A claim field that is compared with the live record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimField {
    Owner,
    Jurisdiction,
}

/// How a confirmation ended, derived from a [`VerificationVerdict`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictOutcome {
    /// The live record corroborates every compared field.
    Verified,
    /// The record exists but disagrees with the claim.
    Mismatch,
    /// The registry has no such parcel.
    NotFound,
    /// The registry could not be asked; nothing was proven either way.
    Unverifiable,
}

impl VerdictOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Mismatch => "mismatch",
            Self::NotFound => "not found",
            Self::Unverifiable => "could not verify",
        }
    }
}

impl fmt::Display for VerdictOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single confirmation. Always renderable, never a panic path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationVerdict {
    /// True only if owner and jurisdiction both match the live record.
    pub matched: bool,
    /// The record as the registry returns it now.
    pub live_record: Option<LandRecord>,
    /// Set when the registry read itself failed.
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<QueryError>,
    /// Compared fields that differed.
    pub mismatches: Vec<ClaimField>,
}

impl VerificationVerdict {
    pub(crate) fn compared(record: LandRecord, mismatches: Vec<ClaimField>) -> Self {
        Self {
            matched: mismatches.is_empty(),
            live_record: Some(record),
            error: None,
            mismatches,
        }
    }

    pub(crate) fn not_found() -> Self {
        Self {
            matched: false,
            live_record: None,
            error: None,
            mismatches: Vec::new(),
        }
    }

    pub(crate) fn unverifiable(error: QueryError) -> Self {
        Self {
            matched: false,
            live_record: None,
            error: Some(error),
            mismatches: Vec::new(),
        }
    }

    pub fn outcome(&self) -> VerdictOutcome {
        match (&self.error, &self.live_record) {
            (Some(_), _) => VerdictOutcome::Unverifiable,
            (None, None) => VerdictOutcome::NotFound,
            (None, Some(_)) if self.matched => VerdictOutcome::Verified,
            (None, Some(_)) => VerdictOutcome::Mismatch,
        }
    }
}

fn serialize_error<S: Serializer>(error: &Option<QueryError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}
