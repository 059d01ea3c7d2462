//! Engine facade: top-level API for lexrule.
//!
//! The `Engine` owns the rule and question registries and the interview
//! configuration. Sessions are created per interview and never shared, while
//! the registries are immutable and shared between them.

use std::sync::Arc;

use crate::config::InterviewConfig;
use crate::entity::Entity;
use crate::error::{EngineError, LexResult};
use crate::facts::Factlet;
use crate::interview::{Goal, Interview, PendingQuestion, Response};
use crate::question::QuestionBook;
use crate::rules::{Args, Eval, RuleBook};
use crate::session::Session;
use crate::timeline::AnyTimeline;

/// The lexrule evaluation engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: InterviewConfig,
    rules: Arc<RuleBook>,
    questions: Arc<QuestionBook>,
}

impl Engine {
    /// Create an engine over a finished rule base.
    pub fn new(config: InterviewConfig, rules: RuleBook, questions: QuestionBook) -> LexResult<Self> {
        config.validate()?;
        tracing::info!(
            rules = rules.len(),
            max_unknowns = config.max_unknowns,
            max_answer_attempts = config.max_answer_attempts,
            "initializing lexrule engine"
        );
        Ok(Self {
            config,
            rules: Arc::new(rules),
            questions: Arc::new(questions),
        })
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn questions(&self) -> &QuestionBook {
        &self.questions
    }

    /// A fresh session sized by the config.
    pub fn new_session(&self) -> Session {
        Session::with_max_unknowns(self.config.max_unknowns)
    }

    /// Build a goal for a registered relationship.
    pub fn goal(&self, relationship: &str, entities: &[Entity]) -> LexResult<Goal> {
        if !self.rules.contains(relationship) {
            return Err(EngineError::UnknownGoal {
                name: relationship.to_string(),
            }
            .into());
        }
        let args = Args::from_entities(entities).ok_or_else(|| EngineError::BadArity {
            name: relationship.to_string(),
            given: entities.len(),
        })?;
        Ok(Goal::new(relationship, args))
    }

    /// Evaluate a goal without recording unknowns.
    pub fn evaluate(&self, session: &mut Session, goal: &Goal) -> AnyTimeline {
        let was_collecting = session.is_collecting();
        session.set_collecting(false);
        let value = Eval::new(&self.rules, session).evaluate(&goal.relationship, &goal.args);
        session.set_collecting(was_collecting);
        value
    }

    /// One investigation pass: evaluate the goal collecting unknowns, and
    /// pick the first one as the next question.
    ///
    /// The session's unknowns list holds this pass's findings until the next
    /// pass starts.
    pub fn investigate(&self, session: &mut Session, goal: &Goal) -> Response {
        session.unknowns_mut().clear();
        session.set_collecting(true);
        let goal_value = Eval::new(&self.rules, session).evaluate(&goal.relationship, &goal.args);

        let outstanding = session.unknowns().len();
        let dropped = session.unknowns().dropped();
        let next = session.unknowns().first().map(|f| self.question_for(f));

        let answered = session.facts().len();
        let percent_complete = match next {
            None => 100,
            Some(_) => percent(answered, outstanding + dropped),
        };
        tracing::debug!(
            goal = %goal.relationship,
            value = %goal_value,
            outstanding,
            dropped,
            "investigation pass"
        );
        Response {
            complete: next.is_none(),
            next,
            goal_value,
            percent_complete,
        }
    }

    /// Start an interview for `goal`.
    pub fn interview(&self, goal: Goal) -> Interview<'_> {
        Interview::start(self, goal)
    }

    /// Question for a missing fact, falling back to a yes/no question.
    pub fn question_for(&self, factlet: &Factlet) -> PendingQuestion {
        let question = self.questions.describe(&factlet.relationship);
        let text = question.text_for(factlet);
        PendingQuestion {
            factlet: factlet.clone(),
            question,
            text,
        }
    }
}

fn percent(answered: usize, outstanding: usize) -> u8 {
    let total = answered + outstanding;
    if total == 0 {
        return 0;
    }
    ((answered * 100) / total).min(100) as u8
}
