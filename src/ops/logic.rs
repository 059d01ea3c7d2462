//! Three-valued temporal logic over boolean timelines.
//!
//! A Known answer that alone decides the outcome is never hidden behind a
//! sibling's unknown state: `false AND ?` is `false`, `true OR ?` is `true`.
//! Otherwise unknown states propagate by precedence.

use crate::state::{Value, strongest_unknown};
use crate::timeline::combine::{combine_all, combine2, zip_all, zip1, zip2};
use crate::timeline::{BoolTimeline, NumTimeline, Timeline};

fn and_values(values: &[&Value<bool>]) -> Value<bool> {
    if values.iter().any(|v| matches!(v, Value::Known(false))) {
        return Value::Known(false);
    }
    match strongest_unknown(values.iter().map(|v| v.state())) {
        Some(state) => Value::from_state(state),
        None => Value::Known(true),
    }
}

fn or_values(values: &[&Value<bool>]) -> Value<bool> {
    if values.iter().any(|v| matches!(v, Value::Known(true))) {
        return Value::Known(true);
    }
    match strongest_unknown(values.iter().map(|v| v.state())) {
        Some(state) => Value::from_state(state),
        None => Value::Known(false),
    }
}

impl Timeline<bool> {
    pub fn and(&self, other: &BoolTimeline) -> BoolTimeline {
        zip2(self, other, |a, b| and_values(&[a, b]))
    }

    pub fn or(&self, other: &BoolTimeline) -> BoolTimeline {
        zip2(self, other, |a, b| or_values(&[a, b]))
    }

    /// Flip Known values; unknown states pass through.
    pub fn not(&self) -> BoolTimeline {
        zip1(self, |v| v.map(|b| !b))
    }

    pub fn xor(&self, other: &BoolTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a != b)
    }

    /// N-ary AND. True for no operands.
    pub fn and_all(operands: &[&BoolTimeline]) -> BoolTimeline {
        if operands.is_empty() {
            return Timeline::eternal(true);
        }
        zip_all(operands, and_values)
    }

    /// N-ary OR. False for no operands.
    pub fn or_all(operands: &[&BoolTimeline]) -> BoolTimeline {
        if operands.is_empty() {
            return Timeline::eternal(false);
        }
        zip_all(operands, or_values)
    }

    /// How many operands equal `value` at each point.
    pub fn bool_count(value: bool, operands: &[&BoolTimeline]) -> NumTimeline {
        if operands.is_empty() {
            return Timeline::eternal(0.0);
        }
        combine_all(operands, |p| p.iter().filter(|b| ***b == value).count() as f64)
    }

    /// Whether any interval is Known to equal `value`.
    pub fn is_ever(&self, value: bool) -> bool {
        self.points().any(|(_, v)| v.known() == Some(&value))
    }

    /// Whether every interval is Known to equal `value`.
    pub fn is_always(&self, value: bool) -> bool {
        !self.is_empty() && self.points().all(|(_, v)| v.known() == Some(&value))
    }
}

#[cfg(test)]
mod tests {
    use crate::state::ValueState;
    use crate::timeline::{BoolTimeline, Timeline, ymd};

    fn t() -> BoolTimeline {
        Timeline::eternal(true)
    }
    fn f() -> BoolTimeline {
        Timeline::eternal(false)
    }
    fn unstated() -> BoolTimeline {
        Timeline::of_state(ValueState::Unstated)
    }
    fn uncertain() -> BoolTimeline {
        Timeline::of_state(ValueState::Uncertain)
    }
    fn stub() -> BoolTimeline {
        Timeline::of_state(ValueState::Stub)
    }
    fn varying() -> BoolTimeline {
        Timeline::eternal(false)
            .with_known(ymd(2000, 1, 1), true)
            .with_state(ymd(2001, 1, 1), ValueState::Uncertain)
            .with_state(ymd(2002, 1, 1), ValueState::Unstated)
    }

    #[test]
    fn and_basics() {
        assert_eq!(t().and(&f()), f());
        assert_eq!(t().and(&t()), t());
        assert_eq!(f().and(&f()), f());
        assert_eq!(t().and(&t()).and(&f()), f());
    }

    #[test]
    fn and_with_unknowns() {
        assert_eq!(t().and(&uncertain()), uncertain());
        assert_eq!(f().and(&uncertain()), f());
        assert_eq!(uncertain().and(&uncertain()), uncertain());
        assert_eq!(unstated().and(&uncertain()), uncertain());
        assert_eq!(t().and(&unstated()), unstated());
        assert_eq!(t().and(&f()).and(&unstated()), f());
        assert_eq!(t().and(&unstated()).and(&f()), f());
    }

    #[test]
    fn false_dominates_every_state() {
        for s in [unstated(), uncertain(), stub(), varying()] {
            assert_eq!(f().and(&s), f());
            assert_eq!(s.and(&f()), f());
            assert_eq!(t().or(&s), t());
            assert_eq!(s.or(&t()), t());
        }
    }

    #[test]
    fn and_over_time() {
        assert_eq!(
            varying().and(&unstated()),
            Timeline::eternal(false)
                .with_state(ymd(2000, 1, 1), ValueState::Unstated)
                .with_state(ymd(2001, 1, 1), ValueState::Uncertain)
                .with_state(ymd(2002, 1, 1), ValueState::Unstated)
        );
        assert_eq!(varying().and(&t()), varying());
        assert_eq!(varying().and(&f()), f());
        assert_eq!(
            varying().and(&uncertain()),
            Timeline::eternal(false).with_state(ymd(2000, 1, 1), ValueState::Uncertain)
        );
    }

    #[test]
    fn or_basics() {
        assert_eq!(t().or(&f()), t());
        assert_eq!(f().or(&f()), f());
        assert_eq!(f().or(&f()).or(&t()), t());
        assert_eq!(f().or(&f().or(&t())), t());
        assert_eq!(unstated().or(&f()).or(&t()), t());
        assert_eq!(f().or(&unstated()), unstated());
    }

    #[test]
    fn or_over_time() {
        assert_eq!(
            varying().or(&unstated()),
            Timeline::of_state(ValueState::Unstated)
                .with_known(ymd(2000, 1, 1), true)
                .with_state(ymd(2001, 1, 1), ValueState::Uncertain)
                .with_state(ymd(2002, 1, 1), ValueState::Unstated)
        );
        assert_eq!(varying().or(&t()), t());
        assert_eq!(varying().or(&f()), varying());
        assert_eq!(
            varying().or(&uncertain()),
            Timeline::of_state(ValueState::Uncertain)
                .with_known(ymd(2000, 1, 1), true)
                .with_state(ymd(2001, 1, 1), ValueState::Uncertain)
        );
    }

    #[test]
    fn not_flips_known_only() {
        assert_eq!(t().not(), f());
        assert_eq!(unstated().not(), unstated());
        assert_eq!(uncertain().not(), uncertain());
        assert_eq!(
            varying().not(),
            Timeline::eternal(true)
                .with_known(ymd(2000, 1, 1), false)
                .with_state(ymd(2001, 1, 1), ValueState::Uncertain)
                .with_state(ymd(2002, 1, 1), ValueState::Unstated)
        );
    }

    #[test]
    fn not_is_an_involution() {
        for x in [t(), f(), unstated(), uncertain(), stub(), varying()] {
            assert_eq!(x.not().not(), x);
        }
    }

    #[test]
    fn nested_and_or() {
        assert_eq!(f().or(&unstated().and(&t())), unstated());
    }

    #[test]
    fn n_ary_reducers() {
        assert_eq!(BoolTimeline::and_all(&[&t(), &t(), &f()]), f());
        assert_eq!(BoolTimeline::and_all(&[]), t());
        assert_eq!(BoolTimeline::or_all(&[&f(), &unstated()]), unstated());
        assert_eq!(BoolTimeline::or_all(&[&f(), &unstated(), &t()]), t());
    }

    #[test]
    fn counting_booleans() {
        assert_eq!(BoolTimeline::bool_count(true, &[&t()]), Timeline::eternal(1.0));
        assert_eq!(BoolTimeline::bool_count(false, &[&t()]), Timeline::eternal(0.0));
        assert_eq!(BoolTimeline::bool_count(false, &[&t(), &t()]), Timeline::eternal(0.0));
        assert_eq!(BoolTimeline::bool_count(true, &[&t(), &t()]), Timeline::eternal(2.0));
        assert_eq!(BoolTimeline::bool_count(true, &[&t(), &f()]), Timeline::eternal(1.0));
    }

    #[test]
    fn ever_and_always() {
        assert!(varying().is_ever(true));
        assert!(!varying().is_always(false));
        assert!(f().is_always(false));
        assert!(!unstated().is_ever(false));
    }

    #[test]
    fn xor_propagates() {
        assert_eq!(t().xor(&f()), t());
        assert_eq!(t().xor(&t()), f());
        assert_eq!(t().xor(&stub()), stub());
    }
}
