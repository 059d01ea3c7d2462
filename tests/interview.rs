//! Interviews driven by scripted answer sources.

use std::collections::VecDeque;

use chrono::NaiveDate;

use lexrule::config::InterviewConfig;
use lexrule::demo::{demo_questions, demo_rules};
use lexrule::engine::Engine;
use lexrule::entity::Entity;
use lexrule::facts::Factlet;
use lexrule::interview::{AnswerError, AnswerSource, InterviewError, PendingQuestion};
use lexrule::state::ValueState;
use lexrule::timeline::{AnyTimeline, BoolTimeline, DateTimeline, NumTimeline, StrTimeline, ValueKind, ymd};

/// Answers from a fixed script, recording what was asked.
#[derive(Default)]
struct ScriptedSource {
    answers: VecDeque<&'static str>,
    asked: Vec<(String, usize, u8)>,
    rejected: usize,
}

impl ScriptedSource {
    fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn asked_texts(&self) -> Vec<&str> {
        self.asked.iter().map(|(t, _, _)| t.as_str()).collect()
    }
}

impl AnswerSource for ScriptedSource {
    fn ask(&mut self, question: &PendingQuestion, attempt: usize, percent_complete: u8) -> Option<String> {
        self.asked.push((question.text.clone(), attempt, percent_complete));
        self.answers.pop_front().map(str::to_string)
    }

    fn reject(&mut self, _question: &PendingQuestion, _error: &AnswerError) {
        self.rejected += 1;
    }
}

fn demo_engine() -> Engine {
    let config = InterviewConfig::default();
    Engine::new(config.clone(), demo_rules(&config), demo_questions()).unwrap()
}

fn run(goal: &str, answers: &[&'static str]) -> (Result<AnyTimeline, InterviewError>, ScriptedSource) {
    let engine = demo_engine();
    let goal = engine.goal(goal, &[Entity::new("Ann")]).unwrap();
    let mut source = ScriptedSource::new(answers);
    let result = engine.interview(goal).run(&mut source);
    (result, source)
}

#[test]
fn eligibility_interview() {
    let (result, source) = run("isEligible", &["yes", "y"]);
    assert_eq!(result.unwrap(), AnyTimeline::from(BoolTimeline::eternal(true)));
    assert_eq!(
        source.asked_texts(),
        vec!["Does Ann have a driver's license?", "Does Ann have an income?"]
    );
    let percents: Vec<u8> = source.asked.iter().map(|(_, _, p)| *p).collect();
    assert_eq!(percents, vec![0, 50]);
}

#[test]
fn bad_answers_are_reprompted() {
    let (result, source) = run("isEligible", &["maybe", "yes", "no"]);
    assert_eq!(result.unwrap(), AnyTimeline::from(BoolTimeline::eternal(false)));
    assert_eq!(source.rejected, 1);
    let attempts: Vec<usize> = source.asked.iter().map(|(_, a, _)| *a).collect();
    assert_eq!(attempts, vec![1, 2, 1]);
}

#[test]
fn engine_states_are_reprompted() {
    let (result, source) = run("isEligible", &["yes", "Unstated", "Stub", "no"]);
    assert_eq!(result.unwrap(), AnyTimeline::from(BoolTimeline::eternal(false)));
    assert_eq!(source.rejected, 2);
    let attempts: Vec<usize> = source.asked.iter().map(|(_, a, _)| *a).collect();
    assert_eq!(attempts, vec![1, 1, 2, 3]);
}

#[test]
fn exhausted_attempts_record_uncertain() {
    let (result, source) = run("isEligible", &["maybe", "perhaps", "dunno", "yes"]);
    assert_eq!(
        result.unwrap(),
        AnyTimeline::of_state(ValueKind::Boolean, ValueState::Uncertain)
    );
    assert_eq!(source.rejected, 3);
    assert_eq!(source.asked.len(), 4);
}

#[test]
fn closed_source_stops_the_interview() {
    let (result, _) = run("isEligible", &["yes"]);
    assert!(matches!(result, Err(InterviewError::SourceClosed)));
}

#[test]
fn filing_status_with_changing_answers() {
    let (result, _) = run("filingStatus", &["{Dawn: no; 2015-06-01: yes}", "no"]);
    let expected = StrTimeline::eternal("single".to_string())
        .with_known(ymd(2015, 6, 1), "married filing jointly".to_string());
    assert_eq!(result.unwrap(), AnyTimeline::from(expected));
}

#[test]
fn penalty_asks_typed_questions() {
    let (result, source) = run("owesPenalty", &["2015-04-20", "04/15/2015", "$1,200"]);
    assert_eq!(result.unwrap(), AnyTimeline::from(BoolTimeline::eternal(true)));
    assert_eq!(
        source.asked_texts(),
        vec![
            "When did Ann file the return?",
            "What was Ann's filing deadline?",
            "How much tax does Ann owe?",
        ]
    );
}

#[test]
fn facts_given_up_front_are_not_asked() {
    let engine = demo_engine();
    let goal = engine.goal("daysLate", &[Entity::new("Ann")]).unwrap();
    let mut interview = engine.interview(goal);
    interview.session_mut().assert(
        Factlet::new("Ann", "filingDeadline"),
        DateTimeline::eternal(NaiveDate::from_ymd_opt(2015, 4, 15).unwrap()),
    );
    let mut source = ScriptedSource::new(&["2015-04-18"]);
    let value = interview.run(&mut source).unwrap();
    assert_eq!(value, AnyTimeline::from(NumTimeline::eternal(3.0)));
    assert_eq!(source.asked_texts(), vec!["When did Ann file the return?"]);
    assert_eq!(interview.percent_complete(), 100);
}

#[test]
fn tighter_attempt_limit_from_config() {
    let config = InterviewConfig {
        max_answer_attempts: 1,
        ..Default::default()
    };
    let engine = Engine::new(config.clone(), demo_rules(&config), demo_questions()).unwrap();
    let goal = engine.goal("isEligible", &[Entity::new("Ann")]).unwrap();
    let mut source = ScriptedSource::new(&["maybe", "no"]);
    let value = engine.interview(goal).run(&mut source).unwrap();
    assert_eq!(value, AnyTimeline::from(BoolTimeline::eternal(false)));
    assert_eq!(source.rejected, 1);
}
