use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::random::{RandomSource, ThreadRandom};
use crate::spec::DiceSpec;

/// Everything one roll produced.
///
/// `raw` is sorted ascending, and `dropped_low`, `kept`, `dropped_high`
/// concatenated in that order reproduce it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results {
    /// Sum of `kept`. Serialized as a decimal string.
    #[serde(serialize_with = "serialize_total")]
    pub total: BigUint,
    pub raw: Vec<u64>,
    pub dropped_low: Vec<u64>,
    pub dropped_high: Vec<u64>,
    pub kept: Vec<u64>,
}

fn serialize_total<S: Serializer>(total: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(total)
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.total, self.kept)?;
        if !self.dropped_low.is_empty() {
            write!(f, " (low: {:?})", self.dropped_low)?;
        }
        if !self.dropped_high.is_empty() {
            write!(f, " (high: {:?})", self.dropped_high)?;
        }
        Ok(())
    }
}

impl DiceSpec {
    /// Roll every die, sort, split off the drops and sum what is left.
    ///
    /// # Panics
    ///
    /// Assumes `self` is valid. A spec that came from deserialization must
    /// pass [`DiceSpec::validate`] first; an invalid one may panic while
    /// partitioning.
    pub fn roll<R: RandomSource + ?Sized>(&self, source: &mut R) -> Results {
        let count = self.count() as usize;
        let sides = self.sides() as u64;

        let mut raw: Vec<u64> = (0..count)
            .map(|_| {
                let face = source.next(sides) + 1;
                trace!(face, sides, "draw");
                face
            })
            .collect();
        raw.sort_unstable();

        let low_end = self.drop_low() as usize;
        let high_start = count - self.drop_high() as usize;
        let dropped_low = raw[..low_end].to_vec();
        let dropped_high = raw[high_start..].to_vec();
        let kept = raw[low_end..high_start].to_vec();

        let total = kept.iter().fold(BigUint::zero(), |acc, &v| acc + v);
        debug!(spec = %self, %total, kept = kept.len(), "rolled");

        Results { total, raw, dropped_low, dropped_high, kept }
    }

    /// Same as [`DiceSpec::roll`] but only the kept total.
    pub fn roll_total<R: RandomSource + ?Sized>(&self, source: &mut R) -> BigUint {
        self.roll(source).total
    }

    /// Roll with a fresh [`ThreadRandom`].
    pub fn roll_default(&self) -> Results {
        self.roll(&mut ThreadRandom)
    }

    pub fn roll_total_default(&self) -> BigUint {
        self.roll_total(&mut ThreadRandom)
    }
}
