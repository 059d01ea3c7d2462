//! Type-erased timelines, so facts of different kinds share one store.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::EntitySet;
use crate::state::{Value, ValueState};

use super::{BoolTimeline, DateTimeline, NumTimeline, SetTimeline, StrTimeline, Timeline};

/// The payload type of a relationship's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Boolean,
    Number,
    Date,
    String,
    Set,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::String => "string",
            ValueKind::Set => "set",
        };
        f.write_str(name)
    }
}

/// A timeline of any supported payload kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "timeline", rename_all = "lowercase")]
pub enum AnyTimeline {
    Boolean(BoolTimeline),
    Number(NumTimeline),
    Date(DateTimeline),
    String(StrTimeline),
    Set(SetTimeline),
}

impl AnyTimeline {
    /// A payload-free state for all time, of the given kind.
    pub fn of_state(kind: ValueKind, state: ValueState) -> Self {
        match kind {
            ValueKind::Boolean => AnyTimeline::Boolean(Timeline::of_state(state)),
            ValueKind::Number => AnyTimeline::Number(Timeline::of_state(state)),
            ValueKind::Date => AnyTimeline::Date(Timeline::of_state(state)),
            ValueKind::String => AnyTimeline::String(Timeline::of_state(state)),
            ValueKind::Set => AnyTimeline::Set(Timeline::of_state(state)),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AnyTimeline::Boolean(_) => ValueKind::Boolean,
            AnyTimeline::Number(_) => ValueKind::Number,
            AnyTimeline::Date(_) => ValueKind::Date,
            AnyTimeline::String(_) => ValueKind::String,
            AnyTimeline::Set(_) => ValueKind::Set,
        }
    }

    /// Strongest non-Known state anywhere on the timeline.
    pub fn strongest_unknown(&self) -> Option<ValueState> {
        match self {
            AnyTimeline::Boolean(t) => t.strongest_unknown(),
            AnyTimeline::Number(t) => t.strongest_unknown(),
            AnyTimeline::Date(t) => t.strongest_unknown(),
            AnyTimeline::String(t) => t.strongest_unknown(),
            AnyTimeline::Set(t) => t.strongest_unknown(),
        }
    }

    pub fn unanswerable_state(&self) -> Option<ValueState> {
        match self {
            AnyTimeline::Boolean(t) => t.unanswerable_state(),
            AnyTimeline::Number(t) => t.unanswerable_state(),
            AnyTimeline::Date(t) => t.unanswerable_state(),
            AnyTimeline::String(t) => t.unanswerable_state(),
            AnyTimeline::Set(t) => t.unanswerable_state(),
        }
    }

    pub fn is_eternal(&self) -> bool {
        match self {
            AnyTimeline::Boolean(t) => t.is_eternal(),
            AnyTimeline::Number(t) => t.is_eternal(),
            AnyTimeline::Date(t) => t.is_eternal(),
            AnyTimeline::String(t) => t.is_eternal(),
            AnyTimeline::Set(t) => t.is_eternal(),
        }
    }

    /// Borrow as a typed timeline, if the kind matches.
    pub fn as_typed<T: Payload>(&self) -> Option<&Timeline<T>> {
        T::from_any(self)
    }
}

impl fmt::Display for AnyTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyTimeline::Boolean(t) => write!(f, "{t}"),
            AnyTimeline::Number(t) => write!(f, "{t}"),
            AnyTimeline::Date(t) => write!(f, "{t}"),
            AnyTimeline::String(t) => write!(f, "{t}"),
            AnyTimeline::Set(t) => write!(f, "{t}"),
        }
    }
}

impl<T: Payload> From<Timeline<T>> for AnyTimeline {
    fn from(t: Timeline<T>) -> Self {
        T::into_any(t)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// A type that can be the payload of a stored fact.
pub trait Payload: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const KIND: ValueKind;

    fn into_any(timeline: Timeline<Self>) -> AnyTimeline;

    fn from_any(any: &AnyTimeline) -> Option<&Timeline<Self>>;
}

macro_rules! impl_payload {
    ($ty:ty, $variant:ident) => {
        impl Payload for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_any(timeline: Timeline<Self>) -> AnyTimeline {
                AnyTimeline::$variant(timeline)
            }

            fn from_any(any: &AnyTimeline) -> Option<&Timeline<Self>> {
                match any {
                    AnyTimeline::$variant(t) => Some(t),
                    _ => None,
                }
            }
        }
    };
}

impl_payload!(bool, Boolean);
impl_payload!(f64, Number);
impl_payload!(NaiveDate, Date);
impl_payload!(String, String);
impl_payload!(EntitySet, Set);

/// Lift a constant to an eternal, Known timeline.
pub fn lift<T: Payload>(payload: T) -> Timeline<T> {
    Timeline::from_value(Value::Known(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_access_checks_kind() {
        let any: AnyTimeline = lift(true).into();
        assert_eq!(any.kind(), ValueKind::Boolean);
        assert_eq!(any.as_typed::<bool>(), Some(&Timeline::eternal(true)));
        assert!(any.as_typed::<f64>().is_none());
    }

    #[test]
    fn of_state_has_requested_kind() {
        let any = AnyTimeline::of_state(ValueKind::Date, ValueState::Stub);
        assert_eq!(any.kind(), ValueKind::Date);
        assert_eq!(any.strongest_unknown(), Some(ValueState::Stub));
        assert_eq!(any.to_string(), "Stub");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let any: AnyTimeline = lift(2.5).into();
        let json = serde_json::to_value(&any).unwrap();
        assert_eq!(json["kind"], "number");
        let back: AnyTimeline = serde_json::from_value(json).unwrap();
        assert_eq!(back, any);
    }
}
