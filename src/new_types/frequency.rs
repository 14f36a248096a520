use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

pub const FREQ_MAX: u8 = u8::MAX;

/// Occurrence count of a k-mer. Saturates at FREQ_MAX, counts above are lost.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Display, Into, Serialize, Deserialize)]
pub struct Frequency(u8);

impl Frequency {
    pub fn one() -> Self {
        Frequency(1)
    }
    pub fn get(&self) -> u8 {
        self.0
    }
    /// no bounds enforcement: zero is accepted.
    pub fn set(&mut self, freq: u8) {
        self.0 = freq;
    }
    pub fn is_saturated(&self) -> bool {
        self.0 == FREQ_MAX
    }
    pub fn incr(&mut self) {
        if self.0 != FREQ_MAX {
            self.0 += 1;
        }
    }
    pub fn saturating_add(&mut self, other: Frequency) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::one()
    }
}
