//! Knowledge states and the precedence used when they meet.
//!
//! Every point on a timeline is either [`Value::Known`] (a usable payload) or
//! one of the unknown states. When several unknown states contribute to the
//! same result, the one with the highest precedence wins:
//!
//! ```text
//! Null < Known < Unstated < Stub < Uncertain
//! ```
//!
//! `Null` is a merge placeholder used by conditional evaluation and is never a
//! terminal answer. The order lives in [`PRECEDENCE`] so it can be changed in
//! one place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How well a value is known at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueState {
    /// A concrete payload is available.
    Known,
    /// The fact has not been asked yet.
    Unstated,
    /// The rule that would produce the value is not implemented.
    Stub,
    /// The fact was asked but the answer is not known.
    Uncertain,
    /// No value assigned yet (merge placeholder).
    Null,
}

/// States ordered from weakest to strongest.
pub const PRECEDENCE: [ValueState; 5] = [
    ValueState::Null,
    ValueState::Known,
    ValueState::Unstated,
    ValueState::Stub,
    ValueState::Uncertain,
];

impl ValueState {
    /// Position of this state in [`PRECEDENCE`].
    pub fn rank(self) -> usize {
        PRECEDENCE
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// Whether this state carries a usable payload.
    pub fn is_known(self) -> bool {
        self == ValueState::Known
    }

    /// `Unstated`, `Stub` or `Uncertain`.
    pub fn is_unknown(self) -> bool {
        matches!(
            self,
            ValueState::Unstated | ValueState::Stub | ValueState::Uncertain
        )
    }

    /// The higher-precedence of two states.
    pub fn max_precedence(self, other: ValueState) -> ValueState {
        if other.rank() > self.rank() { other } else { self }
    }
}

impl PartialOrd for ValueState {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueState {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for ValueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueState::Known => "Known",
            ValueState::Unstated => "Unstated",
            ValueState::Stub => "Stub",
            ValueState::Uncertain => "Uncertain",
            ValueState::Null => "Null",
        };
        f.write_str(name)
    }
}

/// Strongest non-Known state among `states`, or `None` if all are Known.
///
/// `Null` only wins when it is the sole non-Known state present.
pub fn strongest_unknown<I>(states: I) -> Option<ValueState>
where
    I: IntoIterator<Item = ValueState>,
{
    states
        .into_iter()
        .filter(|s| !s.is_known())
        .reduce(ValueState::max_precedence)
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The value of a timeline at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value<T> {
    Known(T),
    Unstated,
    Stub,
    Uncertain,
    Null,
}

impl<T> Value<T> {
    /// Build a payload-free value for a non-Known state.
    ///
    /// # Panics
    ///
    /// Panics when called with [`ValueState::Known`], which needs a payload.
    pub fn from_state(state: ValueState) -> Self {
        match state {
            ValueState::Unstated => Value::Unstated,
            ValueState::Stub => Value::Stub,
            ValueState::Uncertain => Value::Uncertain,
            ValueState::Null => Value::Null,
            ValueState::Known => panic!("a Known value needs a payload"),
        }
    }

    pub fn state(&self) -> ValueState {
        match self {
            Value::Known(_) => ValueState::Known,
            Value::Unstated => ValueState::Unstated,
            Value::Stub => ValueState::Stub,
            Value::Uncertain => ValueState::Uncertain,
            Value::Null => ValueState::Null,
        }
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Keep the state, transform a Known payload.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Value<U> {
        match self {
            Value::Known(v) => Value::Known(f(v)),
            other => Value::from_state(other.state()),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Known(v) => write!(f, "{v}"),
            other => write!(f, "{}", other.state()),
        }
    }
}
