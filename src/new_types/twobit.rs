use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Twobits may be unexpected: N: 0x7, A: 0x0, C: 0x1, T: 0x2, G: 0x3
pub(crate) struct ThreeBit(u8);

/// One of the four nucleotide symbols, no N.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TwoBit(u8);

pub const SYMBOLS: usize = 4;

impl ThreeBit {
    pub(crate) fn as_twobit_if_not_n(&self) -> Option<TwoBit> {
        if self.0 < 4 {
            Some(TwoBit(self.0))
        } else {
            None
        }
    }
}

impl From<u8> for ThreeBit {
    fn from(base: u8) -> ThreeBit {
        ThreeBit((base >> 1) & 0x7)
    }
}

impl TwoBit {
    /// masked, callers pass symbols taken from a kmer.
    pub(crate) fn new(b2: u8) -> TwoBit {
        dbg_assert!(b2 < 4, "twobit out of range: {}", b2);
        TwoBit(b2 & 3)
    }
    /// None for ambiguous bases.
    pub fn from_ascii(base: u8) -> Option<TwoBit> {
        ThreeBit::from(base).as_twobit_if_not_n()
    }
    /// the four symbols, in scan order.
    pub fn all() -> impl Iterator<Item = TwoBit> {
        (0..SYMBOLS as u8).map(TwoBit)
    }
    pub fn as_u8(&self) -> u8 {
        self.0
    }
    pub fn as_usize(&self) -> usize {
        self.as_u8() as usize
    }
    pub fn as_u64(&self) -> u64 {
        u64::from(self.as_u8())
    }
    pub(crate) fn as_kmer_top(&self, shift: u32) -> u64 {
        self.as_u64() << shift
    }
    pub fn as_ascii(&self) -> u8 {
        b"ACTG"[self.as_usize()]
    }
}

impl TryFrom<u8> for TwoBit {
    type Error = Error;

    fn try_from(b2: u8) -> Result<TwoBit, Error> {
        if b2 < 4 {
            Ok(TwoBit(b2))
        } else {
            Err(anyhow!("twobit out of range: {}", b2))
        }
    }
}

impl From<TwoBit> for u8 {
    fn from(b2: TwoBit) -> u8 {
        b2.0
    }
}

impl fmt::Debug for TwoBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "A (0)"),
            1 => write!(f, "C (1)"),
            2 => write!(f, "T (2)"),
            3 => write!(f, "G (3)"),
            _ => unreachable!(),
        }
    }
}
