//! Rule registry and the evaluation context rules run in.
//!
//! A rule computes one relationship for up to three entities and returns a
//! timeline. Rules read inputs and call other rules through [`Eval`], which
//! routes fact reads to the session (feeding the unknowns list) and rule
//! calls back to the [`RuleBook`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::facts::Factlet;
use crate::session::Session;
use crate::state::ValueState;
use crate::timeline::{AnyTimeline, Payload, Timeline, ValueKind};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// The entities a rule is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Args {
    pub first: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third: Option<Entity>,
}

impl Args {
    pub fn one(first: impl Into<Entity>) -> Self {
        Self {
            first: first.into(),
            second: None,
            third: None,
        }
    }

    pub fn two(first: impl Into<Entity>, second: impl Into<Entity>) -> Self {
        Self {
            second: Some(second.into()),
            ..Self::one(first)
        }
    }

    pub fn three(
        first: impl Into<Entity>,
        second: impl Into<Entity>,
        third: impl Into<Entity>,
    ) -> Self {
        Self {
            third: Some(third.into()),
            ..Self::two(first, second)
        }
    }

    /// Build from a list of one to three entities.
    pub fn from_entities(entities: &[Entity]) -> Option<Self> {
        match entities {
            [a] => Some(Self::one(a.clone())),
            [a, b] => Some(Self::two(a.clone(), b.clone())),
            [a, b, c] => Some(Self::three(a.clone(), b.clone(), c.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for e in self.second.iter().chain(self.third.iter()) {
            write!(f, ", {e}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

pub type RuleFn = dyn Fn(&mut Eval<'_>, &Args) -> AnyTimeline + Send + Sync;

/// A registered rule: the relationship it computes and how.
#[derive(Clone)]
pub struct Rule {
    pub name: String,
    pub kind: ValueKind,
    func: Arc<RuleFn>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Relationship name to rule. Immutable once handed to an engine.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    rules: HashMap<String, Rule>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed rule, replacing any rule of the same name.
    pub fn register<T, F>(&mut self, name: impl Into<String>, func: F)
    where
        T: Payload,
        F: Fn(&mut Eval<'_>, &Args) -> Timeline<T> + Send + Sync + 'static,
    {
        let name = name.into();
        let erased: Arc<RuleFn> = Arc::new(move |e: &mut Eval<'_>, a: &Args| func(e, a).into());
        self.rules.insert(
            name.clone(),
            Rule {
                name,
                kind: T::KIND,
                func: erased,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered relationship names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Evaluation context
// ---------------------------------------------------------------------------

/// What a rule sees while it runs.
pub struct Eval<'a> {
    rules: &'a RuleBook,
    session: &'a mut Session,
}

impl<'a> Eval<'a> {
    pub fn new(rules: &'a RuleBook, session: &'a mut Session) -> Self {
        Self { rules, session }
    }

    /// Read the input fact `relationship(subject)`.
    pub fn input<T: Payload>(&mut self, subject: &Entity, relationship: &str) -> Timeline<T> {
        self.session.get(&Factlet::new(subject.clone(), relationship))
    }

    /// Read the input fact `relationship(subject, object)`.
    pub fn input_rel<T: Payload>(
        &mut self,
        subject: &Entity,
        relationship: &str,
        object: &Entity,
    ) -> Timeline<T> {
        let factlet = Factlet::new(subject.clone(), relationship).with_object(object.clone());
        self.session.get(&factlet)
    }

    /// Evaluate another rule as a typed timeline.
    ///
    /// A missing rule yields `Stub`; a rule of a different kind yields
    /// `Uncertain`.
    pub fn rule<T: Payload>(&mut self, name: &str, args: &Args) -> Timeline<T> {
        let rules = self.rules;
        let Some(rule) = rules.get(name) else {
            tracing::debug!(rule = name, "no rule registered, returning Stub");
            return Timeline::of_state(ValueState::Stub);
        };
        if rule.kind != T::KIND {
            tracing::warn!(
                rule = name,
                registered = %rule.kind,
                requested = %T::KIND,
                "rule called with the wrong value kind"
            );
            return Timeline::of_state(ValueState::Uncertain);
        }
        let result = (rule.func)(self, args);
        match result.as_typed::<T>() {
            Some(t) => t.clone(),
            None => Timeline::of_state(ValueState::Uncertain),
        }
    }

    /// Evaluate a rule by name, whatever its kind. A missing rule yields a
    /// boolean `Stub`.
    pub fn evaluate(&mut self, name: &str, args: &Args) -> AnyTimeline {
        let rules = self.rules;
        match rules.get(name) {
            Some(rule) => (rule.func)(self, args),
            None => {
                tracing::debug!(rule = name, "no rule registered, returning Stub");
                AnyTimeline::of_state(ValueKind::Boolean, ValueState::Stub)
            }
        }
    }

    pub fn session(&mut self) -> &mut Session {
        self.session
    }
}
