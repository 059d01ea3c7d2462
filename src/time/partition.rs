//! Recurring-period timelines ("the year", "the month", ...) and constant-date
//! booleans.
//!
//! A partition is a number timeline whose breakpoints mark period starts. It
//! opens at dawn with label `0`, carries one breakpoint per period across the
//! requested span, and closes with a `0` breakpoint at the end of the span.
//! Partitions are deliberately not leaned: the calendar week labels every
//! period `0`, and leaning would erase the boundaries.

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::state::Value;
use crate::timeline::{BoolTimeline, NumTimeline, Timeline, midnight};

fn first_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// January 1st of the year after `year`.
fn first_after(year: i32) -> Option<NaiveDate> {
    year.checked_add(1).and_then(first_of_year)
}

fn current_year() -> i32 {
    Local::now().date_naive().year()
}

/// First year and the year after the last of a span `half_span` years either
/// side of the current year.
fn span_around_now(half_span: u32) -> Option<(i32, i32)> {
    let half = i32::try_from(half_span).ok()?;
    let now = current_year();
    Some((now.checked_sub(half)?, now.checked_add(half)?))
}

/// Lay out periods from `start` (inclusive) to `end` (exclusive).
fn recurrence(
    start: NaiveDate,
    end: NaiveDate,
    next: impl Fn(NaiveDate) -> Option<NaiveDate>,
    label: impl Fn(NaiveDate, usize) -> f64,
) -> NumTimeline {
    let mut periods = Timeline::eternal(0.0);
    let mut day = start;
    let mut index = 0;
    while day < end {
        periods.push(midnight(day), Value::Known(label(day, index)));
        index += 1;
        match next(day) {
            Some(d) => day = d,
            None => break,
        }
    }
    if end > start {
        periods.push(midnight(end), Value::Known(0.0));
    }
    periods
}

/// Calendar years `first..=last`, labelled with the year number.
pub fn years(first: i32, last: i32) -> NumTimeline {
    match (first_of_year(first), first_after(last)) {
        (Some(start), Some(end)) => recurrence(
            start,
            end,
            |d| d.checked_add_months(Months::new(12)),
            |d, _| f64::from(d.year()),
        ),
        _ => Timeline::eternal(0.0),
    }
}

/// Calendar months of the years `first..=last`, labelled 1 to 12.
pub fn months(first: i32, last: i32) -> NumTimeline {
    match (first_of_year(first), first_after(last)) {
        (Some(start), Some(end)) => recurrence(
            start,
            end,
            |d| d.checked_add_months(Months::new(1)),
            |d, _| f64::from(d.month()),
        ),
        _ => Timeline::eternal(0.0),
    }
}

/// Fiscal quarters labelled 1 to 4, the first starting on `q1_start` and the
/// span covering `years` fiscal years.
pub fn quarters(q1_start: NaiveDate, years: u32) -> NumTimeline {
    let end = years
        .checked_mul(12)
        .and_then(|months| q1_start.checked_add_months(Months::new(months)));
    match end {
        Some(end) => recurrence(
            q1_start,
            end,
            |d| d.checked_add_months(Months::new(3)),
            |_, i| (i % 4 + 1) as f64,
        ),
        None => Timeline::eternal(0.0),
    }
}

/// One period per day in `[start, end)`, labelled with the day of the month.
pub fn days(start: NaiveDate, end: NaiveDate) -> NumTimeline {
    recurrence(start, end, |d| d.succ_opt(), |d, _| f64::from(d.day()))
}

/// Weeks starting on Saturday, covering the years `first..=last`.
///
/// Week one starts on the Saturday on or before January 1st. Weeks are not
/// numbered, since the last week of one year and the first of the next can
/// overlap; every period carries the label `0`.
pub fn calendar_weeks(first: i32, last: i32) -> NumTimeline {
    let (Some(jan1), Some(end)) = (first_of_year(first), first_after(last)) else {
        return Timeline::eternal(0.0);
    };
    // Days back from January 1st to the preceding (or same) Saturday.
    let back = (jan1.weekday().num_days_from_sunday() + 1) % 7;
    let start = jan1 - Days::new(u64::from(back));
    recurrence(start, end, |d| d.checked_add_days(Days::new(7)), |_, _| 0.0)
}

// ---------------------------------------------------------------------------
// Relative to the current year
// ---------------------------------------------------------------------------

/// Years in a span of `half_span` years either side of the current year.
pub fn the_year(half_span: u32) -> NumTimeline {
    match span_around_now(half_span) {
        Some((first, end)) => years(first, end - 1),
        None => Timeline::eternal(0.0),
    }
}

/// Fiscal quarters with Q1 starting on `q1_month`/`q1_day`, centred on the
/// fiscal year that begins in the current year.
///
/// Days past the end of a short month fall back to the last valid day.
pub fn the_quarter(q1_month: u32, q1_day: u32, half_span: u32) -> NumTimeline {
    let Some((year, _)) = span_around_now(half_span) else {
        return Timeline::eternal(0.0);
    };
    let q1 = (1..=q1_day.min(31))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, q1_month, d));
    match (q1, half_span.checked_mul(2)) {
        (Some(start), Some(years)) => quarters(start, years),
        _ => Timeline::eternal(0.0),
    }
}

pub fn the_month(half_span: u32) -> NumTimeline {
    match span_around_now(half_span) {
        Some((first, end)) => months(first, end - 1),
        None => Timeline::eternal(0.0),
    }
}

pub fn the_calendar_week(half_span: u32) -> NumTimeline {
    match span_around_now(half_span) {
        Some((first, end)) => calendar_weeks(first, end - 1),
        None => Timeline::eternal(0.0),
    }
}

pub fn the_day(half_span: u32) -> NumTimeline {
    let bounds = span_around_now(half_span)
        .and_then(|(first, end)| Some((first_of_year(first)?, first_of_year(end)?)));
    match bounds {
        Some((start, end)) => days(start, end),
        None => Timeline::eternal(0.0),
    }
}

// ---------------------------------------------------------------------------
// Constant-date booleans
// ---------------------------------------------------------------------------

/// True from the start of `date` onwards.
pub fn is_at_or_after(date: NaiveDate) -> BoolTimeline {
    Timeline::eternal(false)
        .with_known(midnight(date), true)
        .into_lean()
}

/// True until the start of `date`.
pub fn is_before(date: NaiveDate) -> BoolTimeline {
    Timeline::eternal(true)
        .with_known(midnight(date), false)
        .into_lean()
}

/// True from the start of `start` through the end of `end`.
pub fn is_between(start: NaiveDate, end: NaiveDate) -> BoolTimeline {
    if end < start {
        return Timeline::eternal(false);
    }
    let mut t = Timeline::eternal(false).with_known(midnight(start), true);
    if let Some(after) = end.succ_opt() {
        t.push(midnight(after), Value::Known(false));
    }
    t.into_lean()
}
