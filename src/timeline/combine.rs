//! Pointwise combination of timelines.
//!
//! Every operator in the crate reduces to the same algorithm:
//!
//! 1. take the sorted union of the operands' breakpoints,
//! 2. read every operand as of each point (forward fill),
//! 3. if all operands are Known, apply the combining function,
//! 4. otherwise record the strongest non-Known state present,
//! 5. lean the result.
//!
//! The `zip*` functions expose steps 1, 2 and 5 with a caller-supplied rule for
//! step 3/4 (used by short-circuiting logic). The `combine*` functions apply
//! the standard propagation rule, and the `try_combine*` variants let the
//! combining function itself return an unknown state (division by zero).

use std::collections::BTreeSet;

use crate::state::{Value, ValueState, strongest_unknown};

use super::{Timeline, Timestamp};

/// Walks a timeline forward, answering "value as of t" for increasing `t`.
struct Cursor<'a, T> {
    timeline: &'a Timeline<T>,
    passed: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(timeline: &'a Timeline<T>) -> Self {
        assert!(
            !timeline.points.is_empty(),
            "cannot combine an empty timeline"
        );
        Self {
            timeline,
            passed: 0,
        }
    }

    fn seek(&mut self, t: Timestamp) -> Option<&'a Value<T>> {
        let points = &self.timeline.points;
        while self.passed < points.len() && points[self.passed].0 <= t {
            self.passed += 1;
        }
        self.passed.checked_sub(1).map(|i| &points[i].1)
    }
}

/// Sorted union of the breakpoints of homogeneous timelines.
pub fn time_points<T>(operands: &[&Timeline<T>]) -> Vec<Timestamp> {
    let set: BTreeSet<Timestamp> = operands
        .iter()
        .flat_map(|t| t.points.iter().map(|(ts, _)| *ts))
        .collect();
    set.into_iter().collect()
}

fn propagate<R>(states: impl IntoIterator<Item = ValueState>) -> Value<R> {
    Value::from_state(strongest_unknown(states).unwrap_or(ValueState::Null))
}

// ---------------------------------------------------------------------------
// Raw zips
// ---------------------------------------------------------------------------

/// Apply `f` to the value of `a` at each of its breakpoints.
pub fn zip1<A, R, F>(a: &Timeline<A>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&Value<A>) -> Value<R>,
{
    assert!(!a.points.is_empty(), "cannot combine an empty timeline");
    let mut out = Timeline::new();
    for (t, v) in &a.points {
        out.push(*t, f(v));
    }
    out.into_lean()
}

/// Apply `f` to the values of `a` and `b` at each point of their union.
///
/// An operand that has not started yet reads as `Null`.
pub fn zip2<A, B, R, F>(a: &Timeline<A>, b: &Timeline<B>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&Value<A>, &Value<B>) -> Value<R>,
{
    let (null_a, null_b) = (Value::Null, Value::Null);
    let mut ca = Cursor::new(a);
    let mut cb = Cursor::new(b);

    let points: BTreeSet<Timestamp> = a
        .points
        .iter()
        .map(|(t, _)| *t)
        .chain(b.points.iter().map(|(t, _)| *t))
        .collect();

    let mut out = Timeline::new();
    for t in points {
        let va = ca.seek(t).unwrap_or(&null_a);
        let vb = cb.seek(t).unwrap_or(&null_b);
        out.push(t, f(va, vb));
    }
    out.into_lean()
}

/// Apply `f` to the values of all operands at each point of their union.
///
/// Returns an empty timeline when `operands` is empty.
pub fn zip_all<A, R, F>(operands: &[&Timeline<A>], f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&[&Value<A>]) -> Value<R>,
{
    let null = Value::Null;
    let mut cursors: Vec<Cursor<'_, A>> = operands.iter().map(|t| Cursor::new(t)).collect();

    let mut out = Timeline::new();
    let mut slice = Vec::with_capacity(operands.len());
    for t in time_points(operands) {
        slice.clear();
        slice.extend(cursors.iter_mut().map(|c| c.seek(t).unwrap_or(&null)));
        out.push(t, f(&slice));
    }
    out.into_lean()
}

// ---------------------------------------------------------------------------
// Standard propagation
// ---------------------------------------------------------------------------

pub fn try_combine1<A, R, F>(a: &Timeline<A>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&A) -> Value<R>,
{
    zip1(a, |v| match v {
        Value::Known(x) => f(x),
        other => propagate([other.state()]),
    })
}

pub fn combine1<A, R, F>(a: &Timeline<A>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&A) -> R,
{
    try_combine1(a, |x| Value::Known(f(x)))
}

pub fn try_combine2<A, B, R, F>(a: &Timeline<A>, b: &Timeline<B>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&A, &B) -> Value<R>,
{
    zip2(a, b, |x, y| match (x, y) {
        (Value::Known(x), Value::Known(y)) => f(x, y),
        _ => propagate([x.state(), y.state()]),
    })
}

/// Combine two timelines with a total function on their payloads.
pub fn combine2<A, B, R, F>(a: &Timeline<A>, b: &Timeline<B>, f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&A, &B) -> R,
{
    try_combine2(a, b, |x, y| Value::Known(f(x, y)))
}

pub fn try_combine_all<A, R, F>(operands: &[&Timeline<A>], f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&[&A]) -> Value<R>,
{
    zip_all(operands, |values| {
        let payloads: Option<Vec<&A>> = values.iter().map(|v| v.known()).collect();
        match payloads {
            Some(p) => f(&p),
            None => propagate(values.iter().map(|v| v.state())),
        }
    })
}

/// Combine N timelines of one payload type.
pub fn combine_all<A, R, F>(operands: &[&Timeline<A>], f: F) -> Timeline<R>
where
    R: Clone + PartialEq,
    F: Fn(&[&A]) -> R,
{
    try_combine_all(operands, |p| Value::Known(f(p)))
}
