//! A small built-in rule base used by the CLI and the tests.
//!
//! | goal                 | kind    | reads                                   |
//! |----------------------|---------|-----------------------------------------|
//! | `isEligible`         | boolean | `hasLicense`, `hasIncome`               |
//! | `filingStatus`       | string  | `isMarried`, `hasDependents`            |
//! | `meetsResidencyTest` | boolean | `livesInState`                          |
//! | `filedLate`          | boolean | `filingDate`, `filingDeadline`          |
//! | `daysLate`           | number  | `filingDate`, `filingDeadline`          |
//! | `owesPenalty`        | boolean | `filedLate`, `taxOwed`                  |
//! | `yearsInState`       | number  | `livesInState`                          |

use chrono::NaiveDate;

use crate::config::InterviewConfig;
use crate::question::{Question, QuestionBook};
use crate::rules::{Args, Eval, RuleBook};
use crate::switch::Switch;
use crate::time::elapsed::{running_elapsed_per, total_elapsed_days_per};
use crate::time::partition;
use crate::timeline::{BoolTimeline, DateTimeline, NumTimeline, StrTimeline, Timeline, ValueKind};

/// Days in a calendar year a person must live in the state to be resident.
pub const RESIDENCY_DAYS: f64 = 183.0;

/// Calendar years covered by the residency test.
pub const RESIDENCY_YEARS: (i32, i32) = (2000, 2040);

fn text(s: &str) -> StrTimeline {
    Timeline::eternal(s.to_string())
}

/// The demo rules. Relative partitions span the configured number of years.
pub fn demo_rules(config: &InterviewConfig) -> RuleBook {
    let mut rules = RuleBook::new();
    let half_span = config.partition_half_span_years;

    rules.register("isEligible", |e: &mut Eval<'_>, a: &Args| {
        let license: BoolTimeline = e.input(&a.first, "hasLicense");
        let income: BoolTimeline = e.input(&a.first, "hasIncome");
        license.and(&income)
    });

    rules.register("filingStatus", |e: &mut Eval<'_>, a: &Args| {
        let married: BoolTimeline = e.input(&a.first, "isMarried");
        let dependents: BoolTimeline = e.input(&a.first, "hasDependents");
        Switch::new()
            .case(&married, || text("married filing jointly"))
            .case(&dependents, || text("head of household"))
            .otherwise(|| text("single"))
    });

    rules.register("meetsResidencyTest", |e: &mut Eval<'_>, a: &Args| {
        let lived: BoolTimeline = e.input(&a.first, "livesInState");
        let (first, last) = RESIDENCY_YEARS;
        total_elapsed_days_per(&lived, &partition::years(first, last))
            .gt(&NumTimeline::eternal(RESIDENCY_DAYS))
    });

    rules.register("yearsInState", move |e: &mut Eval<'_>, a: &Args| {
        let lived: BoolTimeline = e.input(&a.first, "livesInState");
        running_elapsed_per(&lived, &partition::the_year(half_span))
    });

    rules.register("filedLate", |e: &mut Eval<'_>, a: &Args| {
        let filed: DateTimeline = e.input(&a.first, "filingDate");
        let deadline: DateTimeline = e.input(&a.first, "filingDeadline");
        filed.is_after(&deadline)
    });

    rules.register("daysLate", |e: &mut Eval<'_>, a: &Args| {
        let filed: Timeline<NaiveDate> = e.input(&a.first, "filingDate");
        let deadline: Timeline<NaiveDate> = e.input(&a.first, "filingDeadline");
        deadline.days_until(&filed).max(&NumTimeline::eternal(0.0))
    });

    rules.register("owesPenalty", |e: &mut Eval<'_>, a: &Args| {
        let late: BoolTimeline = e.rule("filedLate", a);
        let owed: NumTimeline = e.input(&a.first, "taxOwed");
        late.and(&owed.gt(&NumTimeline::eternal(0.0)))
    });

    rules
}

/// Question text for every input the demo rules read.
pub fn demo_questions() -> QuestionBook {
    let mut book = QuestionBook::new();
    for q in [
        Question::new("hasLicense", ValueKind::Boolean, "Does {subj} have a driver's license?"),
        Question::new("hasIncome", ValueKind::Boolean, "Does {subj} have an income?"),
        Question::new("isMarried", ValueKind::Boolean, "Is {subj} married?"),
        Question::new("hasDependents", ValueKind::Boolean, "Does {subj} have dependents?"),
        Question::new("livesInState", ValueKind::Boolean, "Does {subj} live in the state?")
            .with_explanation(
                "If this changed over time, answer like {Dawn: false; 2015-03-01: true}.",
            ),
        Question::new("filingDate", ValueKind::Date, "When did {subj} file the return?"),
        Question::new("filingDeadline", ValueKind::Date, "What was {subj}'s filing deadline?"),
        Question::new("taxOwed", ValueKind::Number, "How much tax does {subj} owe?")
            .with_explanation("Enter the amount in dollars, or 0 if nothing is owed."),
    ] {
        book.register(q);
    }
    book
}
