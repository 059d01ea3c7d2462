//! The fact base: asserted timelines keyed by `(subject, relationship, object)`.

pub mod unknowns;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::timeline::{AnyTimeline, Payload, Timeline};

pub use unknowns::{DEFAULT_MAX_UNKNOWNS, Unknowns};

/// Reference to a fact, asserted or still missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Factlet {
    pub subject: Entity,
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Entity>,
}

impl Factlet {
    pub fn new(subject: impl Into<Entity>, relationship: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            relationship: relationship.into(),
            object: None,
        }
    }

    pub fn with_object(mut self, object: impl Into<Entity>) -> Self {
        self.object = Some(object.into());
        self
    }
}

impl fmt::Display for Factlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(object) => write!(f, "{}({}, {})", self.relationship, self.subject, object),
            None => write!(f, "{}({})", self.relationship, self.subject),
        }
    }
}

/// In-memory fact store. Assertion is last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: BTreeMap<Factlet, AnyTimeline>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert a typed timeline, replacing any previous value.
    pub fn assert<T: Payload>(&mut self, factlet: Factlet, value: Timeline<T>) {
        self.assert_any(factlet, value.into());
    }

    pub fn assert_any(&mut self, factlet: Factlet, value: AnyTimeline) {
        tracing::debug!(fact = %factlet, %value, "fact asserted");
        self.facts.insert(factlet, value);
    }

    pub fn get_any(&self, factlet: &Factlet) -> Option<&AnyTimeline> {
        self.facts.get(factlet)
    }

    /// Whether a value, Known or not, has been asserted.
    pub fn has_been_asserted(&self, factlet: &Factlet) -> bool {
        self.facts.contains_key(factlet)
    }

    /// Remove a fact, returning its value.
    pub fn retract(&mut self, factlet: &Factlet) -> Option<AnyTimeline> {
        self.facts.remove(factlet)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Facts in `Factlet` order.
    pub fn iter(&self) -> impl Iterator<Item = (&Factlet, &AnyTimeline)> {
        self.facts.iter()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ValueState;
    use crate::timeline::{BoolTimeline, NumTimeline, ymd};

    #[test]
    fn last_write_wins() {
        let mut store = FactStore::new();
        let f = Factlet::new("Ann", "income");
        store.assert(f.clone(), NumTimeline::eternal(1.0));
        store.assert(f.clone(), NumTimeline::eternal(2.0).with_known(ymd(2015, 1, 1), 3.0));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get_any(&f).and_then(|a| a.as_typed::<f64>()),
            Some(&NumTimeline::eternal(2.0).with_known(ymd(2015, 1, 1), 3.0))
        );
    }

    #[test]
    fn uncertain_is_distinct_from_absent() {
        let mut store = FactStore::new();
        let asked = Factlet::new("Ann", "hasLicense");
        let never = Factlet::new("Bob", "hasLicense");
        store.assert(asked.clone(), BoolTimeline::of_state(ValueState::Uncertain));
        assert!(store.has_been_asserted(&asked));
        assert!(!store.has_been_asserted(&never));
    }

    #[test]
    fn retract_and_clear() {
        let mut store = FactStore::new();
        let f = Factlet::new("Ann", "parentOf").with_object("Cy");
        store.assert(f.clone(), BoolTimeline::eternal(true));
        assert!(store.retract(&f).is_some());
        assert!(store.is_empty());
        store.assert(f, BoolTimeline::eternal(true));
        store.clear();
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn factlet_display() {
        assert_eq!(Factlet::new("Ann", "hasIncome").to_string(), "hasIncome(Ann)");
        assert_eq!(
            Factlet::new("Ann", "parentOf").with_object("Cy").to_string(),
            "parentOf(Ann, Cy)"
        );
    }
}
