//! How long a boolean timeline has been true.
//!
//! Every operator here needs a fully Known input over the whole timeline. When
//! the boolean (or the period partition, or the date bounds) carries an
//! unknown state anywhere, the result is that state, strongest first, for all
//! time.

use chrono::NaiveDate;

use crate::state::{Value, ValueState, strongest_unknown};
use crate::timeline::{BoolTimeline, DateTimeline, NumTimeline, Timeline, Timestamp, midnight};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn unknown_in(b: &BoolTimeline, other: Option<ValueState>) -> Option<NumTimeline> {
    strongest_unknown(b.strongest_unknown().into_iter().chain(other)).map(Timeline::of_state)
}

/// Days during which `b` is Known-true within `[from, to)`.
fn true_days(b: &BoolTimeline, from: Timestamp, to: Timestamp) -> f64 {
    b.intervals()
        .filter(|(_, _, v)| matches!(v, Value::Known(true)))
        .map(|(start, stop, _)| {
            let lo = start.max(from);
            let hi = stop.min(to);
            if hi > lo {
                (hi - lo).num_seconds() as f64 / SECONDS_PER_DAY
            } else {
                0.0
            }
        })
        .sum()
}

/// Whether `b` is true at any instant of `[from, to)`.
fn ever_true(b: &BoolTimeline, from: Timestamp, to: Timestamp) -> bool {
    b.intervals()
        .any(|(start, stop, v)| matches!(v, Value::Known(true)) && start < to && stop > from)
}

/// Whether `b` is true throughout `[from, to)`.
fn always_true(b: &BoolTimeline, from: Timestamp, to: Timestamp) -> bool {
    b.intervals()
        .filter(|(start, stop, _)| *start < to && *stop > from)
        .all(|(_, _, v)| matches!(v, Value::Known(true)))
}

/// `(start, end)` of each period; the last period ends at the end of time.
fn period_bounds(periods: &NumTimeline) -> Vec<(Timestamp, Timestamp)> {
    periods.intervals().map(|(s, e, _)| (s, e)).collect()
}

fn first_date(t: &DateTimeline) -> Result<NaiveDate, ValueState> {
    match t.first_value() {
        Value::Known(d) => Ok(*d),
        other => Err(other.state()),
    }
}

/// Total days `b` is true between the first values of `start` and `end`.
pub fn total_elapsed_days(b: &BoolTimeline, start: &DateTimeline, end: &DateTimeline) -> NumTimeline {
    let (from, to) = match (first_date(start), first_date(end)) {
        (Ok(from), Ok(to)) => (from, to),
        (from, to) => {
            let states = [from.err(), to.err()].into_iter().flatten();
            let state = strongest_unknown(states).unwrap_or(ValueState::Uncertain);
            return Timeline::of_state(state);
        }
    };
    if let Some(unknown) = unknown_in(b, None) {
        return unknown;
    }
    Timeline::eternal(true_days(b, midnight(from), midnight(to)))
}

/// [`total_elapsed_days`] divided by 365, ignoring leap years.
pub fn total_elapsed_years(b: &BoolTimeline, start: &DateTimeline, end: &DateTimeline) -> NumTimeline {
    total_elapsed_days(b, start, end).div(&Timeline::eternal(365.0))
}

/// For each period, the days within it during which `b` is true.
///
/// ```
/// use lexrule::time::{elapsed::total_elapsed_days_per, partition::years};
/// use lexrule::timeline::{BoolTimeline, NumTimeline};
///
/// let present = BoolTimeline::eternal(true);
/// let meets_annual_test =
///     total_elapsed_days_per(&present, &years(2014, 2015)).gt(&NumTimeline::eternal(183.0));
/// assert!(meets_annual_test.is_ever(true));
/// ```
pub fn total_elapsed_days_per(b: &BoolTimeline, periods: &NumTimeline) -> NumTimeline {
    if let Some(unknown) = unknown_in(b, periods.strongest_unknown()) {
        return unknown;
    }
    let mut out = Timeline::new();
    for (start, end) in period_bounds(periods) {
        out.push(start, Value::Known(true_days(b, start, end)));
    }
    out.into_lean()
}

/// Running count of periods in which `b` has been true at some point.
pub fn running_elapsed_per(b: &BoolTimeline, periods: &NumTimeline) -> NumTimeline {
    if let Some(unknown) = unknown_in(b, periods.strongest_unknown()) {
        return unknown;
    }
    let mut count = 0.0;
    let mut out = Timeline::new();
    for (start, end) in period_bounds(periods) {
        if ever_true(b, start, end) {
            count += 1.0;
        }
        out.push(start, Value::Known(count));
    }
    out.into_lean()
}

fn streaks(b: &BoolTimeline, bounds: &[(Timestamp, Timestamp)]) -> Vec<f64> {
    let mut streak = 0.0;
    bounds
        .iter()
        .map(|&(start, end)| {
            streak = if always_true(b, start, end) { streak + 1.0 } else { 0.0 };
            streak
        })
        .collect()
}

/// Number of consecutive periods, up to and including the current one, in
/// which `b` is true throughout.
pub fn continuous_elapsed_per(b: &BoolTimeline, periods: &NumTimeline) -> NumTimeline {
    if let Some(unknown) = unknown_in(b, periods.strongest_unknown()) {
        return unknown;
    }
    let bounds = period_bounds(periods);
    let mut out = Timeline::new();
    for (&(start, _), streak) in bounds.iter().zip(streaks(b, &bounds)) {
        out.push(start, Value::Known(streak));
    }
    out.into_lean()
}

/// Like [`continuous_elapsed_per`], counting only completed periods: the
/// streak as of the start of the current period, and zero once `b` stops
/// being true.
pub fn continuous_elapsed_per_past(b: &BoolTimeline, periods: &NumTimeline) -> NumTimeline {
    if let Some(unknown) = unknown_in(b, periods.strongest_unknown()) {
        return unknown;
    }
    let bounds = period_bounds(periods);
    let streaks = streaks(b, &bounds);
    let mut out = Timeline::new();
    for (i, &(start, _)) in bounds.iter().enumerate() {
        let true_now = matches!(b.value_at(start), Some(Value::Known(true)));
        let completed = match i.checked_sub(1) {
            Some(prev) if true_now => streaks[prev],
            _ => 0.0,
        };
        out.push(start, Value::Known(completed));
    }
    out.into_lean()
}
