//! Human-readable, year-scoped order reference.
//!
//! Canonical form: `nay/<year>-<seq padded to 5 digits>-ci`, sequence allocated
//! by a per-year atomic counter. When the counter store is unavailable the
//! generator falls back to a timestamp-derived `nay-<millis>` reference, which
//! is not guaranteed collision-free and is reported as non-canonical.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use naycourse_core::DomainError;

/// Order reference value type, distinct from the internal storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRef(String);

impl OrderRef {
    /// Canonical reference for a year/sequence pair.
    ///
    /// Sequences above 99999 keep all their digits (the pad is a minimum
    /// width, never a truncation).
    pub fn canonical(year: i32, seq: u64) -> Self {
        Self(format!("nay/{year}-{seq:05}-ci"))
    }

    /// Degraded-mode reference derived from a millisecond timestamp.
    pub fn degraded(timestamp_millis: i64) -> Self {
        Self(format!("nay-{timestamp_millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference was allocated by the per-year counter.
    pub fn is_canonical(&self) -> bool {
        let Some(rest) = self.0.strip_prefix("nay/") else {
            return false;
        };
        let Some(rest) = rest.strip_suffix("-ci") else {
            return false;
        };
        let Some((year, seq)) = rest.split_once('-') else {
            return false;
        };
        year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
            && seq.len() >= 5
            && seq.bytes().all(|b| b.is_ascii_digit())
    }

    fn is_degraded(&self) -> bool {
        self.0
            .strip_prefix("nay-")
            .is_some_and(|ts| !ts.is_empty() && ts.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl core::fmt::Display for OrderRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = Self(s.to_string());
        if candidate.is_canonical() || candidate.is_degraded() {
            Ok(candidate)
        } else {
            Err(DomainError::invalid_id(format!("order reference: '{s}'")))
        }
    }
}
