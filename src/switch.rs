//! Temporal conditional evaluation.
//!
//! A [`Switch`] walks `(condition, value)` cases in order. In each interval the
//! first Known-true condition picks its value; an interval where a condition is
//! unknown before any earlier one matched takes that unknown state; intervals
//! no condition claims take the default.
//!
//! Values are built lazily, only when their condition newly claims some
//! interval, so a rule never reads (and never asks about) facts that cannot
//! affect its result.

use crate::state::{Value, ValueState};
use crate::timeline::combine::{zip1, zip2};
use crate::timeline::{BoolTimeline, Timeline};

/// `value` wherever `cond` is Known-true, `Null` elsewhere.
pub fn conditional_assignment<T>(cond: &BoolTimeline, value: &Timeline<T>) -> Timeline<T>
where
    T: Clone + PartialEq,
{
    zip2(cond, value, |c, v| match c {
        Value::Known(true) => v.clone(),
        _ => Value::Null,
    })
}

/// `first` wherever it is not `Null`, otherwise `second`.
pub fn merge<T>(first: &Timeline<T>, second: &Timeline<T>) -> Timeline<T>
where
    T: Clone + PartialEq,
{
    zip2(first, second, |a, b| if a.is_null() { b.clone() } else { a.clone() })
}

/// True in intervals holding `Unstated`, `Stub` or `Uncertain`.
pub fn has_unknown_state<T>(t: &Timeline<T>) -> BoolTimeline
where
    T: Clone + PartialEq,
{
    zip1(t, |v| Value::Known(v.state().is_unknown()))
}

/// True in intervals holding `Null`.
pub fn is_null<T>(t: &Timeline<T>) -> BoolTimeline
where
    T: Clone + PartialEq,
{
    zip1(t, |v| Value::Known(v.is_null()))
}

pub fn has_undefined_intervals<T>(t: &Timeline<T>) -> bool
where
    T: Clone + PartialEq,
{
    t.points().any(|(_, v)| v.is_null())
}

/// The unknown states of `cond`, retyped; `Null` where `cond` is Known.
fn unknown_intervals<T>(cond: &BoolTimeline) -> Timeline<T>
where
    T: Clone + PartialEq,
{
    zip1(cond, |c| {
        let state = c.state();
        if state.is_unknown() {
            Value::from_state(state)
        } else {
            Value::Null
        }
    })
}

/// Builder for an ordered temporal switch.
///
/// ```
/// use lexrule::switch::Switch;
/// use lexrule::timeline::{BoolTimeline, NumTimeline, ymd};
///
/// let married = BoolTimeline::eternal(false).with_known(ymd(2010, 6, 1), true);
/// let rate = Switch::new()
///     .case(&married, || NumTimeline::eternal(0.1))
///     .otherwise(|| NumTimeline::eternal(0.2));
/// assert_eq!(rate.to_string(), "{Dawn: 0.2; 2010-06-01: 0.1}");
/// ```
#[derive(Debug, Clone)]
pub struct Switch<T> {
    result: Timeline<T>,
}

impl<T: Clone + PartialEq> Default for Switch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> Switch<T> {
    pub fn new() -> Self {
        Self {
            result: Timeline::of_state(ValueState::Null),
        }
    }

    /// Add a case. `value` is only called if `cond` is Known-true in some
    /// interval not already claimed by an earlier case.
    pub fn case(mut self, cond: &BoolTimeline, value: impl FnOnce() -> Timeline<T>) -> Self {
        self.result = merge(&self.result, &unknown_intervals(cond));

        let claims = cond.and(&is_null(&self.result));
        if claims.is_ever(true) {
            let assigned = conditional_assignment(&claims, &value());
            self.result = merge(&self.result, &assigned);
        }
        self
    }

    /// Whether every interval already has a value, so later cases cannot
    /// change the result.
    pub fn is_resolved(&self) -> bool {
        !has_undefined_intervals(&self.result)
    }

    /// Fill unclaimed intervals from `default` and return the leaned result.
    pub fn otherwise(self, default: impl FnOnce() -> Timeline<T>) -> Timeline<T> {
        let result = if self.is_resolved() {
            self.result
        } else {
            merge(&self.result, &default())
        };
        debug_assert!(
            !has_undefined_intervals(&result),
            "switch default left an interval without a value"
        );
        result.into_lean()
    }
}

/// Eager form of [`Switch`] over prepared `(condition, value)` pairs.
pub fn switch<T>(cases: &[(BoolTimeline, Timeline<T>)], default: &Timeline<T>) -> Timeline<T>
where
    T: Clone + PartialEq,
{
    cases
        .iter()
        .fold(Switch::new(), |sw, (cond, value)| sw.case(cond, || value.clone()))
        .otherwise(|| default.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{NumTimeline, StrTimeline, ymd};

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn conditional_assignment_masks_with_null() {
        let cond = Timeline::eternal(false)
            .with_known(ymd(2000, 1, 1), true)
            .with_known(ymd(2001, 1, 1), false);
        let r = conditional_assignment(&cond, &NumTimeline::eternal(4.0));
        assert_eq!(
            r,
            Timeline::of_state(ValueState::Null)
                .with_known(ymd(2000, 1, 1), 4.0)
                .with_state(ymd(2001, 1, 1), ValueState::Null)
        );
    }

    #[test]
    fn merge_prefers_first() {
        let a = Timeline::eternal(0.0)
            .with_state(ymd(2000, 1, 1), ValueState::Null)
            .with_known(ymd(2001, 1, 1), 3.0);
        let b = Timeline::eternal(9.0).with_known(ymd(2000, 6, 1), 2.0);
        assert_eq!(
            merge(&a, &b),
            Timeline::eternal(0.0)
                .with_known(ymd(2000, 1, 1), 9.0)
                .with_known(ymd(2000, 6, 1), 2.0)
                .with_known(ymd(2001, 1, 1), 3.0)
        );
    }

    #[test]
    fn masks() {
        let t = NumTimeline::eternal(1.0)
            .with_state(ymd(2000, 1, 1), ValueState::Stub)
            .with_state(ymd(2001, 1, 1), ValueState::Null);
        assert_eq!(
            has_unknown_state(&t),
            Timeline::eternal(false)
                .with_known(ymd(2000, 1, 1), true)
                .with_known(ymd(2001, 1, 1), false)
        );
        assert_eq!(
            is_null(&t),
            Timeline::eternal(false).with_known(ymd(2001, 1, 1), true)
        );
        assert!(has_undefined_intervals(&t));
    }

    #[test]
    fn first_match_wins() {
        let both = BoolTimeline::eternal(true);
        let r = Switch::new()
            .case(&both, || StrTimeline::eternal(s("first")))
            .case(&both, || panic!("shadowed case must not be evaluated"))
            .otherwise(|| StrTimeline::eternal(s("default")));
        assert_eq!(r, StrTimeline::eternal(s("first")));
    }

    #[test]
    fn cases_split_time() {
        let early = BoolTimeline::eternal(true).with_known(ymd(2000, 1, 1), false);
        let late = BoolTimeline::eternal(false).with_known(ymd(2005, 1, 1), true);
        let r = switch(
            &[
                (early, StrTimeline::eternal(s("early"))),
                (late, StrTimeline::eternal(s("late"))),
            ],
            &StrTimeline::eternal(s("middle")),
        );
        assert_eq!(
            r.to_string(),
            "{Dawn: early; 2000-01-01: middle; 2005-01-01: late}"
        );
    }

    #[test]
    fn unknown_condition_yields_its_state() {
        let unknown = BoolTimeline::of_state(ValueState::Unstated);
        let r = Switch::new()
            .case(&unknown, || NumTimeline::eternal(1.0))
            .case(&BoolTimeline::eternal(true), || NumTimeline::eternal(2.0))
            .otherwise(|| NumTimeline::eternal(3.0));
        assert_eq!(r, NumTimeline::of_state(ValueState::Unstated));
    }

    #[test]
    fn unknown_after_match_is_ignored() {
        let r = Switch::new()
            .case(&BoolTimeline::eternal(true), || NumTimeline::eternal(2.0))
            .case(&BoolTimeline::of_state(ValueState::Uncertain), || {
                NumTimeline::eternal(1.0)
            })
            .otherwise(|| NumTimeline::eternal(3.0));
        assert_eq!(r, NumTimeline::eternal(2.0));
    }

    #[test]
    fn resolved_switch_skips_default() {
        let sw = Switch::new().case(&BoolTimeline::eternal(true), || NumTimeline::eternal(5.0));
        assert!(sw.is_resolved());
        let r = sw.otherwise(|| panic!("default must not be evaluated"));
        assert_eq!(r, NumTimeline::eternal(5.0));
    }
}
