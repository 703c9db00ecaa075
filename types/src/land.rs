//! Land parcel identifiers, statuses and registry records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::TypesError;

/// Identifier of a land parcel in the registry.
///
/// Always a positive integer; the registry assigns ids starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandId(NonZeroU64);

impl LandId {
    /// The first id a freshly initialised registry hands out.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    pub fn new(id: u64) -> Result<Self, TypesError> {
        NonZeroU64::new(id)
            .map(Self)
            .ok_or_else(|| TypesError::InvalidLandId(id.to_string()))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for LandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LandId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| TypesError::InvalidLandId(s.to_string()))?;
        Self::new(id)
    }
}

impl TryFrom<u64> for LandId {
    type Error = TypesError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// Administrative status of a parcel as stored by the registry contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandStatus {
    /// Normal state; the parcel can be transferred.
    Active,
    /// Frozen by the registrar; transfers are blocked.
    Frozen,
    /// Ownership is under dispute.
    Disputed,
}

impl LandStatus {
    /// Decode the on-chain `u8` status code.
    pub fn from_code(code: u64) -> Result<Self, TypesError> {
        match code {
            0 => Ok(Self::Active),
            1 => Ok(Self::Frozen),
            2 => Ok(Self::Disputed),
            other => Err(TypesError::UnknownStatus(other)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Frozen => 1,
            Self::Disputed => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Disputed => "disputed",
        }
    }
}

impl fmt::Display for LandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative record of a parcel, as returned by the registry's
/// `get_land_info` view function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandRecord {
    pub id: LandId,
    /// Current owner account.
    pub owner: String,
    /// Free-text administrative region.
    pub jurisdiction: String,
    /// Content address of the off-chain document bundle.
    pub metadata_hash: String,
    pub status: LandStatus,
    /// Registration time in microseconds since the Unix epoch (chain time).
    pub registered_at_micros: u64,
}

impl LandRecord {
    /// Registration time as a UTC datetime, if it is representable.
    pub fn registered_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        crate::time::from_micros(self.registered_at_micros)
    }
}
