// Roel Kluin, 2023, GPL v3

use crate::key::GraphKey;
use crate::new_types::{
    adjacency::Adjacency,
    frequency::Frequency,
    twobit::{TwoBit, SYMBOLS},
};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// The record stored per distinct key: key, saturating count and adjacency.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node<K> {
    key: K,
    freq: Frequency,
    adj: Adjacency,
}

impl<K: GraphKey> Node<K> {
    /// first occurrence: frequency 1, no neighbours.
    pub fn new(key: K) -> Self {
        Node {
            key,
            freq: Frequency::one(),
            adj: Adjacency::default(),
        }
    }
    pub fn key(&self) -> K {
        self.key
    }
    pub fn frequency(&self) -> u8 {
        self.freq.get()
    }
    pub fn set_frequency(&mut self, freq: u8) {
        self.freq.set(freq);
    }
    /// saturates at 255, further occurrences are not counted.
    pub fn increment_frequency(&mut self) {
        self.freq.incr();
    }
    pub fn is_saturated(&self) -> bool {
        self.freq.is_saturated()
    }
    pub fn adjacency(&self) -> Adjacency {
        self.adj
    }
    pub fn is_predecessor(&self, b2: TwoBit) -> bool {
        self.adj.is_predecessor(b2)
    }
    pub fn is_successor(&self, b2: TwoBit) -> bool {
        self.adj.is_successor(b2)
    }
    pub fn add_predecessor(&mut self, b2: TwoBit) {
        self.adj.add_predecessor(b2);
    }
    pub fn add_successor(&mut self, b2: TwoBit) {
        self.adj.add_successor(b2);
    }
    pub fn predecessors(&self) -> [u8; SYMBOLS] {
        self.adj.predecessors()
    }
    pub fn successors(&self) -> [u8; SYMBOLS] {
        self.adj.successors()
    }
    /// Combine a partial count for the same key: frequencies add up to the
    /// cap, adjacency is unioned. A different key leaves self untouched.
    pub fn merge(&mut self, other: &Node<K>) -> Result<()> {
        ensure!(
            self.key == other.key,
            "invariant violation: cannot merge node {:?} into {:?}",
            other.key,
            self.key
        );
        self.freq.saturating_add(other.freq);
        self.adj.union(&other.adj);
        Ok(())
    }
}
