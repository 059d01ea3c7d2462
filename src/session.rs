//! Per-interview state: facts, collected unknowns and the collection flag.

use crate::facts::{FactStore, Factlet, Unknowns};
use crate::state::ValueState;
use crate::timeline::{AnyTimeline, Payload, Timeline};

/// Everything one interview mutates. Sessions share nothing with each other.
#[derive(Debug, Clone, Default)]
pub struct Session {
    facts: FactStore,
    unknowns: Unknowns,
    collecting: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose unknowns list holds at most `max_unknowns` facts.
    pub fn with_max_unknowns(max_unknowns: usize) -> Self {
        Self {
            unknowns: Unknowns::with_capacity(max_unknowns),
            ..Self::default()
        }
    }

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    pub fn facts_mut(&mut self) -> &mut FactStore {
        &mut self.facts
    }

    pub fn unknowns(&self) -> &Unknowns {
        &self.unknowns
    }

    pub fn unknowns_mut(&mut self) -> &mut Unknowns {
        &mut self.unknowns
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    pub fn set_collecting(&mut self, on: bool) {
        self.collecting = on;
    }

    pub fn assert<T: Payload>(&mut self, factlet: Factlet, value: Timeline<T>) {
        self.facts.assert(factlet, value);
    }

    pub fn assert_any(&mut self, factlet: Factlet, value: AnyTimeline) {
        self.facts.assert_any(factlet, value);
    }

    /// Read a fact as a typed timeline.
    ///
    /// An absent fact reads as `Unstated` and, while collecting, is recorded
    /// as an unknown. A fact stored with a different value kind reads as
    /// `Uncertain`.
    pub fn get<T: Payload>(&mut self, factlet: &Factlet) -> Timeline<T> {
        match self.facts.get_any(factlet) {
            Some(any) => match any.as_typed::<T>() {
                Some(t) => t.clone(),
                None => {
                    tracing::warn!(
                        fact = %factlet,
                        stored = %any.kind(),
                        requested = %T::KIND,
                        "fact read with the wrong value kind"
                    );
                    Timeline::of_state(ValueState::Uncertain)
                }
            },
            None => {
                if self.collecting {
                    self.unknowns.push(factlet.clone());
                }
                Timeline::of_state(ValueState::Unstated)
            }
        }
    }

    /// Forget all facts and unknowns.
    pub fn clear(&mut self) {
        self.facts.clear();
        self.unknowns.clear();
    }
}
