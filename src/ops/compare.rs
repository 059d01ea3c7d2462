//! Equality and ordering comparisons producing boolean timelines.

use chrono::NaiveDate;

use crate::timeline::combine::combine2;
use crate::timeline::{BoolTimeline, DateTimeline, NumTimeline, Timeline};

impl<T: Clone + PartialEq> Timeline<T> {
    /// Pointwise equality.
    pub fn equals(&self, other: &Timeline<T>) -> BoolTimeline {
        combine2(self, other, |a, b| a == b)
    }

    pub fn not_equals(&self, other: &Timeline<T>) -> BoolTimeline {
        self.equals(other).not()
    }
}

impl Timeline<f64> {
    pub fn gt(&self, other: &NumTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a > b)
    }

    pub fn ge(&self, other: &NumTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a >= b)
    }

    pub fn lt(&self, other: &NumTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a < b)
    }

    pub fn le(&self, other: &NumTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a <= b)
    }
}

// Date orderings are all derived from `is_after` and `equals` through the
// three-valued connectives, so unknown states propagate the same way as in
// hand-written rule logic.
impl Timeline<NaiveDate> {
    pub fn is_after(&self, other: &DateTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a > b)
    }

    pub fn ge(&self, other: &DateTimeline) -> BoolTimeline {
        self.is_after(other).or(&self.equals(other))
    }

    pub fn le(&self, other: &DateTimeline) -> BoolTimeline {
        self.is_after(other).not()
    }

    pub fn gt(&self, other: &DateTimeline) -> BoolTimeline {
        self.le(other).not()
    }

    pub fn lt(&self, other: &DateTimeline) -> BoolTimeline {
        self.ge(other).not()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::state::ValueState;
    use crate::timeline::{DateTimeline, NumTimeline, Timeline, ymd};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn number_comparisons() {
        let a = Timeline::eternal(3.0).with_known(ymd(2010, 1, 1), 5.0);
        let b = NumTimeline::eternal(4.0);
        assert_eq!(
            a.gt(&b),
            Timeline::eternal(false).with_known(ymd(2010, 1, 1), true)
        );
        assert_eq!(
            a.le(&b),
            Timeline::eternal(true).with_known(ymd(2010, 1, 1), false)
        );
        assert_eq!(b.ge(&b), Timeline::eternal(true));
        assert_eq!(b.lt(&b), Timeline::eternal(false));
    }

    #[test]
    fn equality_is_generic() {
        let a = Timeline::eternal("x".to_string());
        let b = Timeline::eternal("x".to_string()).with_known(ymd(2000, 1, 1), "y".to_string());
        assert_eq!(
            a.equals(&b),
            Timeline::eternal(true).with_known(ymd(2000, 1, 1), false)
        );
        assert_eq!(
            a.not_equals(&b),
            Timeline::eternal(false).with_known(ymd(2000, 1, 1), true)
        );
    }

    #[test]
    fn date_orderings() {
        let early = DateTimeline::eternal(date(2012, 5, 1));
        let late = DateTimeline::eternal(date(2013, 5, 1));
        assert_eq!(late.gt(&early), Timeline::eternal(true));
        assert_eq!(late.ge(&early), Timeline::eternal(true));
        assert_eq!(early.lt(&late), Timeline::eternal(true));
        assert_eq!(early.le(&early), Timeline::eternal(true));
        assert_eq!(early.lt(&early), Timeline::eternal(false));
        assert_eq!(early.gt(&early), Timeline::eternal(false));
        assert_eq!(early.equals(&early), Timeline::eternal(true));
        assert_eq!(early.not_equals(&late), Timeline::eternal(true));
    }

    #[test]
    fn date_comparison_propagates_unknowns() {
        let known = DateTimeline::eternal(date(2012, 5, 1));
        let missing = DateTimeline::of_state(ValueState::Unstated);
        assert_eq!(known.lt(&missing), Timeline::of_state(ValueState::Unstated));
        assert_eq!(known.ge(&missing), Timeline::of_state(ValueState::Unstated));
        let stub = DateTimeline::of_state(ValueState::Stub);
        assert_eq!(stub.gt(&missing), Timeline::of_state(ValueState::Stub));
    }
}
