//! Undirected document link graph.
//!
//! Links are stored as a set of undirected edges, so `a ~ b` implies `b ~ a`
//! by construction and no caller has to update both sides.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    adjacency: BTreeMap<DbId, BTreeSet<DbId>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the edge `a ~ b`. Returns `false` when it already existed.
    /// Self-edges are ignored.
    pub fn add_edge(&mut self, a: DbId, b: DbId) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        inserted
    }

    /// Remove the edge `a ~ b`. Returns `false` when there was nothing to
    /// remove.
    pub fn remove_edge(&mut self, a: DbId, b: DbId) -> bool {
        let removed = self.detach(a, b);
        self.detach(b, a);
        removed
    }

    /// Drop every edge touching `node`.
    pub fn remove_node(&mut self, node: DbId) {
        if let Some(peers) = self.adjacency.remove(&node) {
            for peer in peers {
                self.detach(peer, node);
            }
        }
    }

    pub fn are_linked(&self, a: DbId, b: DbId) -> bool {
        self.adjacency.get(&a).is_some_and(|peers| peers.contains(&b))
    }

    /// Neighbours of `node` in ascending id order.
    pub fn neighbors(&self, node: DbId) -> Vec<DbId> {
        self.adjacency
            .get(&node)
            .map(|peers| peers.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    fn detach(&mut self, from: DbId, to: DbId) -> bool {
        let Some(peers) = self.adjacency.get_mut(&from) else {
            return false;
        };
        let removed = peers.remove(&to);
        if peers.is_empty() {
            self.adjacency.remove(&from);
        }
        removed
    }
}
