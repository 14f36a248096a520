// Roel Kluin, 2023, GPL v3

use crate::key::GraphKey;
use crate::new_types::twobit::TwoBit;
use crate::node::Node;
use anyhow::Result;
use itertools::{EitherOrBoth, Itertools};
use std::cmp;

/// nodes preallocated by `SortedGraph::new`.
pub const DEFAULT_CAPACITY: usize = 3_000_000;

pub type NodeFactory<K> = fn(K) -> Node<K>;

/// Result of a binary search: the node and its index, or where it would go.
#[derive(Debug)]
pub enum Lookup<'a, K> {
    Found { idx: usize, node: &'a Node<K> },
    Vacant { idx: usize },
}

impl<'a, K> Lookup<'a, K> {
    pub fn idx(&self) -> usize {
        match *self {
            Lookup::Found { idx, .. } | Lookup::Vacant { idx } => idx,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }
    pub fn node(&self) -> Option<&'a Node<K>> {
        match *self {
            Lookup::Found { node, .. } => Some(node),
            Lookup::Vacant { .. } => None,
        }
    }
}

/// Nodes kept in ascending key order, unique per key. Insertion shifts the
/// tail, lookup is a binary search. Nodes are handed out by index; an index
/// stays valid until the next insertion before it.
pub struct SortedGraph<K> {
    nodes: Vec<Node<K>>,
    new_node: NodeFactory<K>,
}

impl<K: GraphKey> SortedGraph<K> {
    pub fn new(new_node: NodeFactory<K>) -> Self {
        SortedGraph::with_capacity(new_node, DEFAULT_CAPACITY)
    }
    pub fn with_capacity(new_node: NodeFactory<K>, capacity: usize) -> Self {
        SortedGraph {
            nodes: Vec::with_capacity(capacity),
            new_node,
        }
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&Node<K>> {
        self.nodes.get(idx)
    }
    pub fn nodes(&self) -> &[Node<K>] {
        &self.nodes
    }
    pub fn iter(&self) -> impl Iterator<Item = &Node<K>> {
        self.nodes.iter()
    }
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.nodes.iter().map(Node::key)
    }
    /// frequencies in key order.
    pub fn frequencies(&self) -> Vec<u8> {
        self.nodes.iter().map(Node::frequency).collect()
    }
    /// all occurrences seen. Saturated nodes are undercounted.
    pub fn total_observations(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.frequency())).sum()
    }

    /// binary search. If absent, idx is the first position with a greater key.
    pub fn lookup(&self, key: &K) -> Lookup<'_, K> {
        match self.nodes.binary_search_by(|n| n.key().cmp(key)) {
            Ok(idx) => Lookup::Found {
                idx,
                node: &self.nodes[idx],
            },
            Err(idx) => Lookup::Vacant { idx },
        }
    }

    /// Place node at idx, shifting the rest up. An index past the end appends.
    /// Only an idx from a Vacant lookup of the node's key keeps the order.
    pub fn insert_at(&mut self, idx: usize, node: Node<K>) -> usize {
        if idx < self.nodes.len() {
            self.nodes.insert(idx, node);
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    /// Connect the node at idx to the first predecessor present, scanning
    /// symbols in order. Only one edge is wired; further predecessors (a
    /// branch) are left alone. Returns the predecessor symbol wired, None
    /// if the node at idx does not hold key.
    pub fn wire_adjacency(&mut self, key: &K, idx: usize) -> Option<TwoBit> {
        match self.nodes.get(idx) {
            Some(node) if node.key() == *key => {}
            _ => {
                dbg_print!("wire_adjacency(): no node for {:?} at {}", key, idx);
                return None;
            }
        }

        for b2 in TwoBit::all() {
            let pred = key.predecessor(b2);
            if let Lookup::Found { idx: pred_idx, .. } = self.lookup(&pred) {
                self.nodes[idx].add_predecessor(b2);
                self.nodes[pred_idx].add_successor(key.last_symbol());
                return Some(b2);
            }
        }
        None
    }

    /// count an occurrence of key, returns its index.
    pub fn insert_one(&mut self, key: K) -> usize {
        match self.lookup(&key) {
            Lookup::Found { idx, .. } => {
                self.nodes[idx].increment_frequency();
                idx
            }
            Lookup::Vacant { idx } => {
                let node = (self.new_node)(key);
                self.insert_at(idx, node)
            }
        }
    }

    /// as insert_one, but a new node is also wired to its predecessor.
    pub fn insert_and_wire(&mut self, key: K) -> usize {
        let len = self.nodes.len();
        let idx = self.insert_one(key);
        if self.nodes.len() != len {
            self.wire_adjacency(&key, idx);
        }
        idx
    }

    pub fn insert_many<I>(&mut self, keys: I) -> Vec<usize>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert_one(key)).collect()
    }

    /// Fold in an independently built graph. Nodes with the same key are
    /// merged, the rest is taken over as is.
    pub fn merge_graph(&mut self, other: SortedGraph<K>) -> Result<()> {
        let capacity = cmp::max(self.nodes.capacity(), self.nodes.len() + other.len());
        let mut merged = Vec::with_capacity(capacity);

        for pair in self
            .nodes
            .drain(..)
            .merge_join_by(other.nodes, |a, b| a.key().cmp(&b.key()))
        {
            match pair {
                EitherOrBoth::Both(mut node, other_node) => {
                    node.merge(&other_node)?;
                    merged.push(node);
                }
                EitherOrBoth::Left(node) | EitherOrBoth::Right(node) => merged.push(node),
            }
        }
        self.nodes = merged;
        Ok(())
    }
}

impl<K: GraphKey> Default for SortedGraph<K> {
    fn default() -> Self {
        SortedGraph::new(Node::new)
    }
}
