use crate::new_types::twobit::{TwoBit, SYMBOLS};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// bits 0..4: successor per symbol, bits 4..8: predecessor per symbol.
const PRED_OFFSET: usize = SYMBOLS;

/// Which of the four successor and four predecessor extensions were seen.
#[derive(Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjacency(BitArray<[u8; 1], Lsb0>);

impl Adjacency {
    pub fn is_successor(&self, b2: TwoBit) -> bool {
        self.0[b2.as_usize()]
    }
    pub fn is_predecessor(&self, b2: TwoBit) -> bool {
        self.0[PRED_OFFSET + b2.as_usize()]
    }
    pub fn add_successor(&mut self, b2: TwoBit) {
        self.0.set(b2.as_usize(), true);
    }
    pub fn add_predecessor(&mut self, b2: TwoBit) {
        self.0.set(PRED_OFFSET + b2.as_usize(), true);
    }
    /// snapshot: 1 where an edge exists, per symbol.
    pub fn successors(&self) -> [u8; SYMBOLS] {
        self.indicators(0)
    }
    pub fn predecessors(&self) -> [u8; SYMBOLS] {
        self.indicators(PRED_OFFSET)
    }
    fn indicators(&self, offset: usize) -> [u8; SYMBOLS] {
        let mut ind = [0; SYMBOLS];
        for (i, bit) in self.0[offset..offset + SYMBOLS].iter().by_vals().enumerate() {
            ind[i] = u8::from(bit);
        }
        ind
    }
    pub fn union(&mut self, other: &Adjacency) {
        self.0 |= other.0.as_bitslice();
    }
    pub fn as_u8(&self) -> u8 {
        self.0.as_raw_slice()[0]
    }
    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }
}

impl fmt::Debug for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pred {:?} succ {:?} ({:#04x})",
            self.predecessors(),
            self.successors(),
            self.as_u8()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_bits() {
        let mut adj = Adjacency::default();
        assert!(adj.is_empty());
        adj.add_successor(TwoBit::new(2));
        adj.add_successor(TwoBit::new(2));
        assert_eq!(adj.successors(), [0, 0, 1, 0]);
        assert_eq!(adj.predecessors(), [0, 0, 0, 0]);
        adj.add_predecessor(TwoBit::new(0));
        adj.add_predecessor(TwoBit::new(3));
        assert_eq!(adj.successors(), [0, 0, 1, 0]);
        assert_eq!(adj.predecessors(), [1, 0, 0, 1]);
        assert!(adj.is_predecessor(TwoBit::new(3)));
        assert!(!adj.is_successor(TwoBit::new(3)));
        assert_eq!(adj.as_u8(), 0x04 | 0x10 | 0x80);
    }
    #[test]
    fn all_eight_flags() {
        let mut adj = Adjacency::default();
        for b2 in TwoBit::all() {
            adj.add_successor(b2);
            adj.add_predecessor(b2);
        }
        assert_eq!(adj.as_u8(), 0xff);
    }
    #[test]
    fn checked_symbols_stay_in_their_half() {
        let mut adj = Adjacency::default();
        for b2 in (0..=u8::MAX).filter_map(|b| TwoBit::try_from(b).ok()) {
            adj.add_successor(b2);
        }
        assert_eq!(adj.successors(), [1, 1, 1, 1]);
        assert_eq!(adj.predecessors(), [0, 0, 0, 0]);
        assert!(!adj.is_predecessor(TwoBit::new(0)));
    }
    #[test]
    fn union() {
        let mut a = Adjacency::default();
        let mut b = Adjacency::default();
        a.add_successor(TwoBit::new(1));
        b.add_predecessor(TwoBit::new(1));
        b.add_successor(TwoBit::new(1));
        a.union(&b);
        assert_eq!(a.successors(), [0, 1, 0, 0]);
        assert_eq!(a.predecessors(), [0, 1, 0, 0]);
        assert_eq!(b.successors(), [0, 1, 0, 0]);
    }
}
