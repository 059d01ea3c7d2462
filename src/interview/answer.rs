//! Turning raw answer text into typed timelines.
//!
//! Accepted forms, by value kind:
//!
//! - boolean: `true/t/yes/y`, `false/f/no/n` (any case)
//! - number: decimal, with `,` separators and a leading `$` ignored
//! - date: `YYYY-MM-DD` or `MM/DD/YYYY`
//! - string: any non-empty text
//! - set: comma-separated entity ids, or `none` for the empty set
//!
//! `?`, `unknown` and `uncertain` record an explicit `Uncertain` answer. A
//! value that changes over time is written in timeline form:
//! `{Dawn: false; 2015-01-01: true}`.

use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

use crate::entity::{Entity, EntitySet};
use crate::state::Value;
use crate::timeline::{AnyTimeline, Timeline, Timestamp, ValueKind, dawn_of_time, midnight};

use super::PendingQuestion;

/// Errors from parsing answer text.
#[derive(Debug, Error, Diagnostic)]
pub enum AnswerError {
    #[error("empty answer")]
    #[diagnostic(
        code(lexrule::answer::empty),
        help("Type a value, or `?` if you do not know.")
    )]
    Empty,

    #[error("\"{input}\" is not a valid {kind}")]
    #[diagnostic(code(lexrule::answer::invalid_value), help("{hint}"))]
    InvalidValue {
        input: String,
        kind: ValueKind,
        hint: &'static str,
    },

    #[error("malformed timeline answer: {message}")]
    #[diagnostic(
        code(lexrule::answer::malformed_timeline),
        help("Write changing values as {{Dawn: value; YYYY-MM-DD: value}} with dates in increasing order.")
    )]
    MalformedTimeline { message: String },
}

pub type AnswerResult<T> = std::result::Result<T, AnswerError>;

/// Where interview answers come from: a console, a script, a test.
pub trait AnswerSource {
    /// Ask a question. `attempt` starts at 1 and grows on each re-prompt.
    /// Returning `None` means the source has no more answers.
    fn ask(
        &mut self,
        question: &PendingQuestion,
        attempt: usize,
        percent_complete: u8,
    ) -> Option<String>;

    /// Told when an answer could not be parsed.
    fn reject(&mut self, _question: &PendingQuestion, _error: &AnswerError) {}
}

fn hint(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Boolean => "Answer yes or no (y/n, true/false).",
        ValueKind::Number => "Enter a number, such as 1200 or 12.5.",
        ValueKind::Date => "Enter a date as YYYY-MM-DD or MM/DD/YYYY.",
        ValueKind::String => "Enter some text.",
        ValueKind::Set => "Enter names separated by commas, or `none`.",
    }
}

fn invalid(input: &str, kind: ValueKind) -> AnswerError {
    AnswerError::InvalidValue {
        input: input.to_string(),
        kind,
        hint: hint(kind),
    }
}

fn is_uncertain(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "?" | "unknown" | "uncertain")
}

/// Parse a yes/no answer.
pub fn clean_boolean(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Some(true),
        "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if raw.eq_ignore_ascii_case("dawn") {
        return Some(dawn_of_time());
    }
    parse_date(raw)
        .map(midnight)
        .or_else(|| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok())
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_set(raw: &str) -> EntitySet {
    if raw.eq_ignore_ascii_case("none") {
        return EntitySet::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Entity::from)
        .collect()
}

/// Parse a single value of `kind`, typed by `parse`.
fn scalar<T: Clone + PartialEq>(
    raw: &str,
    kind: ValueKind,
    parse: impl Fn(&str) -> Option<T>,
) -> AnswerResult<Value<T>> {
    if is_uncertain(raw) {
        return Ok(Value::Uncertain);
    }
    parse(raw).map(Value::Known).ok_or_else(|| invalid(raw, kind))
}

fn timeline<T: Clone + PartialEq>(
    raw: &str,
    kind: ValueKind,
    parse: impl Fn(&str) -> Option<T>,
) -> AnswerResult<Timeline<T>> {
    let Some(body) = raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) else {
        return scalar(raw, kind, parse).map(Timeline::from_value);
    };

    let malformed = |message: String| AnswerError::MalformedTimeline { message };
    let mut out = Timeline::new();
    let mut last: Option<Timestamp> = None;
    for entry in body.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (when, value) = entry
            .split_once(": ")
            .ok_or_else(|| malformed(format!("expected `date: value`, got \"{entry}\"")))?;
        let at = parse_timestamp(when.trim())
            .ok_or_else(|| malformed(format!("\"{when}\" is not Dawn or a date")))?;
        if last.is_some_and(|prev| at <= prev) {
            return Err(malformed(format!("\"{when}\" is out of order")));
        }
        if last.is_none() && at != dawn_of_time() {
            return Err(malformed("the first entry must be Dawn".into()));
        }
        last = Some(at);
        out.push(at, scalar(value.trim(), kind, &parse)?);
    }
    if out.is_empty() {
        return Err(malformed("no entries".into()));
    }
    Ok(out.into_lean())
}

/// Parse raw answer text as a timeline of the question's kind.
pub fn parse_answer(kind: ValueKind, raw: &str) -> AnswerResult<AnyTimeline> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AnswerError::Empty);
    }
    Ok(match kind {
        ValueKind::Boolean => timeline(raw, kind, clean_boolean)?.into(),
        ValueKind::Number => timeline(raw, kind, parse_number)?.into(),
        ValueKind::Date => timeline(raw, kind, parse_date)?.into(),
        ValueKind::String => {
            timeline(raw, kind, |s| (!s.is_empty()).then(|| s.to_string()))?.into()
        }
        ValueKind::Set => timeline(raw, kind, |s| Some(parse_set(s)))?.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ValueState;
    use crate::timeline::{BoolTimeline, NumTimeline, ymd};

    #[test]
    fn booleans_are_cleaned() {
        let cases = [("Y", true), ("yes", true), ("t", true), ("no", false), ("F", false)];
        for (raw, expected) in cases {
            assert_eq!(
                parse_answer(ValueKind::Boolean, raw).unwrap(),
                AnyTimeline::from(BoolTimeline::eternal(expected))
            );
        }
        assert!(matches!(
            parse_answer(ValueKind::Boolean, "maybe"),
            Err(AnswerError::InvalidValue { .. })
        ));
    }

    #[test]
    fn explicit_uncertainty() {
        assert_eq!(
            parse_answer(ValueKind::Number, "?").unwrap(),
            AnyTimeline::from(NumTimeline::of_state(ValueState::Uncertain))
        );
    }

    #[test]
    fn engine_states_are_not_valid_answers() {
        for raw in ["Unstated", "Stub", "{Dawn: y; 2015-01-01: Unstated}"] {
            assert!(
                matches!(
                    parse_answer(ValueKind::Boolean, raw),
                    Err(AnswerError::InvalidValue { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn numbers_dates_strings_sets() {
        assert_eq!(
            parse_answer(ValueKind::Number, "$12,500.50").unwrap(),
            AnyTimeline::from(NumTimeline::eternal(12_500.5))
        );
        let d = NaiveDate::from_ymd_opt(2015, 4, 15).unwrap();
        assert_eq!(
            parse_answer(ValueKind::Date, "04/15/2015").unwrap(),
            AnyTimeline::from(Timeline::eternal(d))
        );
        assert_eq!(
            parse_answer(ValueKind::String, " Lyon ").unwrap(),
            AnyTimeline::from(Timeline::eternal("Lyon".to_string()))
        );
        let set: EntitySet = ["Bo", "Cy"].into_iter().map(Entity::from).collect();
        assert_eq!(
            parse_answer(ValueKind::Set, "Cy, Bo").unwrap(),
            AnyTimeline::from(Timeline::eternal(set))
        );
        assert_eq!(
            parse_answer(ValueKind::Set, "none").unwrap(),
            AnyTimeline::from(Timeline::eternal(EntitySet::new()))
        );
    }

    #[test]
    fn timeline_answers() {
        let raw = "{Dawn: n; 2015-01-01: y; 2016-01-01: Uncertain}";
        let parsed = parse_answer(ValueKind::Boolean, raw);
        assert_eq!(
            parsed.unwrap(),
            AnyTimeline::from(
                BoolTimeline::eternal(false)
                    .with_known(ymd(2015, 1, 1), true)
                    .with_state(ymd(2016, 1, 1), ValueState::Uncertain)
            )
        );
    }

    #[test]
    fn malformed_timelines() {
        for raw in [
            "{2015-01-01: y}",
            "{Dawn: y; 2015-01-01: n; 2014-01-01: y}",
            "{Dawn y}",
            "{}",
        ] {
            assert!(
                matches!(
                    parse_answer(ValueKind::Boolean, raw),
                    Err(AnswerError::MalformedTimeline { .. })
                ),
                "{raw} should be rejected"
            );
        }
        assert!(matches!(parse_answer(ValueKind::Boolean, "  "), Err(AnswerError::Empty)));
    }
}
