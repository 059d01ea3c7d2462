//! Timelines: values that hold from one instant until superseded.
//!
//! A [`Timeline`] is an ordered list of breakpoints. The value at any instant
//! `t` is the value of the latest breakpoint at or before `t` (forward fill).
//! By convention every timeline opens at [`dawn_of_time`].
//!
//! Timelines are built by appending breakpoints in time order and are never
//! mutated once handed to an operator; operators in [`combine`] and
//! [`crate::ops`] read their operands and return new, leaned timelines.
//!
//! Displayed form, for a boolean that becomes true in 2015:
//!
//! ```text
//! {Dawn: false; 2015-01-01: true}
//! ```
//!
//! A timeline with a single breakpoint at dawn is *eternal* and displays as its
//! bare value.

pub mod any;
pub mod combine;

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::EntitySet;
use crate::state::{Value, ValueState, strongest_unknown};

pub use any::{AnyTimeline, Payload, ValueKind};

/// An instant on a timeline.
pub type Timestamp = NaiveDateTime;

pub type BoolTimeline = Timeline<bool>;
pub type NumTimeline = Timeline<f64>;
pub type DateTimeline = Timeline<NaiveDate>;
pub type StrTimeline = Timeline<String>;
pub type SetTimeline = Timeline<EntitySet>;

/// The minimal timestamp (0001-01-01T00:00:00). Opens every timeline.
pub fn dawn_of_time() -> Timestamp {
    midnight(NaiveDate::from_ymd_opt(1, 1, 1).expect("0001-01-01 is a valid date"))
}

/// The maximal timestamp (9999-12-31T23:59:59). Closes open-ended spans.
pub fn end_of_time() -> Timestamp {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .expect("9999-12-31T23:59:59 is a valid timestamp")
}

/// Start of the given day.
pub fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN)
}

/// Midnight of a calendar date.
///
/// # Panics
///
/// Panics if the date does not exist.
pub fn ymd(year: i32, month: u32, day: u32) -> Timestamp {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => midnight(d),
        None => panic!("invalid calendar date {year:04}-{month:02}-{day:02}"),
    }
}

/// Render a timestamp the way timelines display it.
pub fn format_timestamp(ts: Timestamp) -> String {
    if ts == dawn_of_time() {
        "Dawn".to_string()
    } else if ts.time().num_seconds_from_midnight() == 0 && ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// A value that varies over time, with per-interval knowledge state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeline<T>")]
pub struct Timeline<T> {
    points: Vec<(Timestamp, Value<T>)>,
}

/// Breakpoints as read from serialized form, before their order is checked.
#[derive(Deserialize)]
struct RawTimeline<T> {
    points: Vec<(Timestamp, Value<T>)>,
}

/// A serialized timeline that breaks breakpoint ordering.
#[derive(Debug, Error, Diagnostic)]
pub enum TimelineError {
    #[error("timeline has no breakpoints")]
    #[diagnostic(code(lexrule::timeline::empty))]
    Empty,

    #[error("timeline opens at {at} instead of Dawn")]
    #[diagnostic(code(lexrule::timeline::no_dawn))]
    NoDawn { at: String },

    #[error("breakpoint {at} does not come after {previous}")]
    #[diagnostic(
        code(lexrule::timeline::out_of_order),
        help("Breakpoints must be strictly increasing in time.")
    )]
    OutOfOrder { at: String, previous: String },
}

impl<T> TryFrom<RawTimeline<T>> for Timeline<T> {
    type Error = TimelineError;

    fn try_from(raw: RawTimeline<T>) -> Result<Self, Self::Error> {
        let Some((first, _)) = raw.points.first() else {
            return Err(TimelineError::Empty);
        };
        if *first != dawn_of_time() {
            return Err(TimelineError::NoDawn {
                at: format_timestamp(*first),
            });
        }
        if let Some(w) = raw.points.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(TimelineError::OutOfOrder {
                at: format_timestamp(w[1].0),
                previous: format_timestamp(w[0].0),
            });
        }
        Ok(Self { points: raw.points })
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: Clone + PartialEq> Timeline<T> {
    /// An empty timeline. Must receive breakpoints before it is queried.
    pub fn new() -> Self {
        Self::default()
    }

    /// A Known constant for all time.
    pub fn eternal(payload: T) -> Self {
        Self::from_value(Value::Known(payload))
    }

    /// A single value for all time.
    pub fn from_value(value: Value<T>) -> Self {
        Self {
            points: vec![(dawn_of_time(), value)],
        }
    }

    /// A payload-free state for all time.
    pub fn of_state(state: ValueState) -> Self {
        Self::from_value(Value::from_state(state))
    }

    /// Append a breakpoint.
    ///
    /// Appending at the same instant as the last breakpoint replaces it.
    ///
    /// # Panics
    ///
    /// Panics if `at` is earlier than the last breakpoint.
    pub fn push(&mut self, at: Timestamp, value: Value<T>) {
        match self.points.last_mut() {
            Some((last, v)) if *last == at => *v = value,
            Some((last, _)) if *last > at => panic!(
                "breakpoint {} appended after {}",
                format_timestamp(at),
                format_timestamp(*last)
            ),
            _ => self.points.push((at, value)),
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, at: Timestamp, value: Value<T>) -> Self {
        self.push(at, value);
        self
    }

    /// Builder form of [`push`](Self::push) for a Known payload.
    pub fn with_known(self, at: Timestamp, payload: T) -> Self {
        self.with(at, Value::Known(payload))
    }

    /// Builder form of [`push`](Self::push) for a payload-free state.
    pub fn with_state(self, at: Timestamp, state: ValueState) -> Self {
        self.with(at, Value::from_state(state))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Breakpoints in time order.
    pub fn points(&self) -> impl Iterator<Item = (Timestamp, &Value<T>)> {
        self.points.iter().map(|(t, v)| (*t, v))
    }

    pub fn time_points(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.points.iter().map(|(t, _)| *t)
    }

    /// `(start, end, value)` for each breakpoint; the last interval ends at
    /// [`end_of_time`].
    pub fn intervals(&self) -> impl Iterator<Item = (Timestamp, Timestamp, &Value<T>)> {
        let end = end_of_time();
        self.points.iter().enumerate().map(move |(i, (start, v))| {
            let stop = self.points.get(i + 1).map(|(t, _)| *t).unwrap_or(end);
            (*start, stop, v)
        })
    }

    /// Value in force at `t`, or `None` before the first breakpoint.
    pub fn value_at(&self, t: Timestamp) -> Option<&Value<T>> {
        let idx = self.points.partition_point(|(ts, _)| *ts <= t);
        idx.checked_sub(1).map(|i| &self.points[i].1)
    }

    /// Value of the first breakpoint.
    ///
    /// # Panics
    ///
    /// Panics on an empty timeline.
    pub fn first_value(&self) -> &Value<T> {
        match self.points.first() {
            Some((_, v)) => v,
            None => panic!("empty timeline has no value"),
        }
    }

    /// A single breakpoint at dawn.
    pub fn is_eternal(&self) -> bool {
        self.points.len() == 1 && self.points[0].0 == dawn_of_time()
    }

    /// Strongest non-Known state anywhere on the timeline.
    pub fn strongest_unknown(&self) -> Option<ValueState> {
        strongest_unknown(self.points.iter().map(|(_, v)| v.state()))
    }

    /// The first state an answer may not carry: anything but `Known` or
    /// `Uncertain`.
    pub fn unanswerable_state(&self) -> Option<ValueState> {
        self.points
            .iter()
            .map(|(_, v)| v.state())
            .find(|s| !matches!(s, ValueState::Known | ValueState::Uncertain))
    }

    /// Whether the timeline is Known everywhere.
    pub fn is_fully_known(&self) -> bool {
        self.points.iter().all(|(_, v)| v.is_known())
    }

    /// Canonical form: adjacent breakpoints never carry equal values.
    pub fn lean(&self) -> Self {
        self.clone().into_lean()
    }

    pub fn into_lean(mut self) -> Self {
        self.points.dedup_by(|next, prev| next.1 == prev.1);
        self
    }

    pub fn is_lean(&self) -> bool {
        self.points.windows(2).all(|w| w[0].1 != w[1].1)
    }

    /// Transform Known payloads pointwise, keeping unknown states.
    pub fn map<U, F>(&self, f: F) -> Timeline<U>
    where
        U: Clone + PartialEq,
        F: Fn(&T) -> U,
    {
        combine::combine1(self, f)
    }
}

impl<T: Clone + PartialEq + fmt::Display> fmt::Display for Timeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eternal() {
            return write!(f, "{}", self.points[0].1);
        }
        f.write_str("{")?;
        for (i, (t, v)) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {v}", format_timestamp(*t))?;
        }
        f.write_str("}")
    }
}
