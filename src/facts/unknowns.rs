//! Missing facts discovered while evaluating a goal.

use std::collections::HashSet;

use super::Factlet;

/// Default bound on collected unknowns per evaluation pass.
pub const DEFAULT_MAX_UNKNOWNS: usize = 500;

/// Ordered, deduplicated, bounded list of missing facts.
#[derive(Debug, Clone)]
pub struct Unknowns {
    items: Vec<Factlet>,
    seen: HashSet<Factlet>,
    capacity: usize,
    dropped: usize,
}

impl Default for Unknowns {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_UNKNOWNS)
    }
}

impl Unknowns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Record a missing fact. Duplicates are ignored; once full, new facts
    /// are dropped.
    pub fn push(&mut self, factlet: Factlet) {
        if self.seen.contains(&factlet) {
            return;
        }
        if self.items.len() >= self.capacity {
            self.dropped += 1;
            tracing::debug!(
                fact = %factlet,
                capacity = self.capacity,
                "unknowns list full, dropping"
            );
            return;
        }
        self.seen.insert(factlet.clone());
        self.items.push(factlet);
    }

    /// The earliest-discovered missing fact.
    pub fn first(&self) -> Option<&Factlet> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Facts turned away since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &Factlet> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.dropped = 0;
    }
}
