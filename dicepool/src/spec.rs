use std::{fmt, str::FromStr};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, ParseSpecError};

/// A pool of identical dice plus how many of the lowest and highest results to
/// discard before summing.
///
/// Construct through [`DiceSpec::new`] or [`DiceSpec::with_drops`], which
/// validate. Deserializing does *not* validate; call [`DiceSpec::validate`]
/// before rolling a spec that came from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSpec {
    count: i64,
    sides: i64,
    #[serde(default)]
    drop_low: i64,
    #[serde(default)]
    drop_high: i64,
}

impl DiceSpec {
    /// `count` dice with `sides` faces each, all kept.
    pub fn new(count: i64, sides: i64) -> Result<Self, DiceError> {
        Self::with_drops(count, sides, 0, 0)
    }

    pub fn with_drops(
        count: i64,
        sides: i64,
        drop_low: i64,
        drop_high: i64,
    ) -> Result<Self, DiceError> {
        let spec = Self { count, sides, drop_low, drop_high };
        spec.validate()?;
        Ok(spec)
    }

    /// Check every invariant, reporting the first one broken.
    ///
    /// Order: count, sides, drop_low, drop_high, then the combined drop total.
    pub fn validate(&self) -> Result<(), DiceError> {
        if self.count < 1 {
            return Err(DiceError::InvalidCount(self.count));
        }
        if self.sides <= 1 {
            return Err(DiceError::InvalidSides(self.sides));
        }
        if self.drop_low < 0 {
            return Err(DiceError::InvalidDropLow(self.drop_low));
        }
        if self.drop_high < 0 {
            return Err(DiceError::InvalidDropHigh(self.drop_high));
        }
        // Widen so two huge drop counts cannot wrap past `count`.
        if i128::from(self.drop_low) + i128::from(self.drop_high) >= i128::from(self.count) {
            return Err(DiceError::TooManyDropped {
                drop_low: self.drop_low,
                drop_high: self.drop_high,
                count: self.count,
            });
        }
        Ok(())
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn sides(&self) -> i64 {
        self.sides
    }

    pub fn drop_low(&self) -> i64 {
        self.drop_low
    }

    pub fn drop_high(&self) -> i64 {
        self.drop_high
    }

    /// Number of dice that survive the drops.
    ///
    /// Like [`DiceSpec::roll`], the bounds below assume a valid spec. On an
    /// unvalidated one they saturate instead of overflowing, and a kept count
    /// below zero gives bounds of zero.
    pub fn kept_count(&self) -> i64 {
        self.count.saturating_sub(self.drop_low).saturating_sub(self.drop_high)
    }

    /// Smallest total a roll can produce (every kept die shows 1).
    pub fn min_total(&self) -> BigUint {
        BigUint::from(u64::try_from(self.kept_count()).unwrap_or(0))
    }

    /// Largest total a roll can produce (every kept die shows its top face).
    pub fn max_total(&self) -> BigUint {
        self.min_total() * u64::try_from(self.sides).unwrap_or(0)
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.drop_low > 0 {
            write!(f, "L{}", self.drop_low)?;
        }
        if self.drop_high > 0 {
            write!(f, "H{}", self.drop_high)?;
        }
        Ok(())
    }
}

/// Reads the notation produced by `Display`: `NdS`, then optional `L<n>` and
/// `H<n>` in that order. Letters are case-insensitive and a bare `dS` means
/// one die.
impl FromStr for DiceSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let syntax = || ParseSpecError::Syntax(trimmed.to_string());
        let lowered = trimmed.to_ascii_lowercase();

        let (count, rest) = lowered.split_once('d').ok_or_else(syntax)?;
        let count = if count.is_empty() {
            1
        } else {
            match take_number(count) {
                Some((n, "")) => n,
                _ => return Err(syntax()),
            }
        };
        let (sides, rest) = take_number(rest).ok_or_else(syntax)?;
        let (drop_low, rest) = match rest.strip_prefix('l') {
            Some(tail) => take_number(tail).ok_or_else(syntax)?,
            None => (0, rest),
        };
        let (drop_high, rest) = match rest.strip_prefix('h') {
            Some(tail) => take_number(tail).ok_or_else(syntax)?,
            None => (0, rest),
        };
        if !rest.is_empty() {
            return Err(syntax());
        }

        Ok(DiceSpec::with_drops(count, sides, drop_low, drop_high)?)
    }
}

/// Split a leading run of ASCII digits off `s`.
fn take_number(s: &str) -> Option<(i64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let n = s[..end].parse().ok()?;
    Some((n, &s[end..]))
}
