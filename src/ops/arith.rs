//! Arithmetic on number timelines, plus date and string helpers.

use chrono::{Duration, NaiveDate};

use crate::state::Value;
use crate::timeline::combine::{combine_all, combine1, combine2, try_combine2};
use crate::timeline::{DateTimeline, NumTimeline, StrTimeline, Timeline};

impl Timeline<f64> {
    pub fn add(&self, other: &NumTimeline) -> NumTimeline {
        combine2(self, other, |a, b| a + b)
    }

    pub fn sub(&self, other: &NumTimeline) -> NumTimeline {
        combine2(self, other, |a, b| a - b)
    }

    pub fn mul(&self, other: &NumTimeline) -> NumTimeline {
        combine2(self, other, |a, b| a * b)
    }

    /// Division. Where the divisor is a Known zero the result is `Uncertain`.
    pub fn div(&self, other: &NumTimeline) -> NumTimeline {
        try_combine2(self, other, |a, b| {
            if *b == 0.0 {
                Value::Uncertain
            } else {
                Value::Known(a / b)
            }
        })
    }

    pub fn neg(&self) -> NumTimeline {
        combine1(self, |a| -a)
    }

    pub fn abs(&self) -> NumTimeline {
        combine1(self, |a| a.abs())
    }

    pub fn min(&self, other: &NumTimeline) -> NumTimeline {
        combine2(self, other, |a, b| a.min(*b))
    }

    pub fn max(&self, other: &NumTimeline) -> NumTimeline {
        combine2(self, other, |a, b| a.max(*b))
    }

    /// Round half away from zero to `decimals` places.
    pub fn round_to(&self, decimals: i32) -> NumTimeline {
        let scale = 10f64.powi(decimals);
        combine1(self, move |a| (a * scale).round() / scale)
    }

    /// Pointwise sum. Zero for no operands.
    pub fn sum_all(operands: &[&NumTimeline]) -> NumTimeline {
        if operands.is_empty() {
            return Timeline::eternal(0.0);
        }
        combine_all(operands, |p| p.iter().copied().sum())
    }
}

impl Timeline<NaiveDate> {
    /// Shift each date by a (possibly fractional) number of days, truncated
    /// to whole days. Shifts past the representable calendar are `Uncertain`.
    pub fn add_days(&self, days: &NumTimeline) -> DateTimeline {
        try_combine2(self, days, |d, n| {
            match Duration::try_days(n.trunc() as i64).and_then(|delta| d.checked_add_signed(delta)) {
                Some(shifted) => Value::Known(shifted),
                None => Value::Uncertain,
            }
        })
    }

    /// Whole days from `self` to `later` (negative if `later` is earlier).
    pub fn days_until(&self, later: &DateTimeline) -> NumTimeline {
        combine2(self, later, |a, b| (*b - *a).num_days() as f64)
    }
}

impl Timeline<String> {
    pub fn concat(&self, other: &StrTimeline) -> StrTimeline {
        combine2(self, other, |a, b| format!("{a}{b}"))
    }
}
