//! The investigation loop: evaluate, ask, assert, repeat.
//!
//! ```text
//! Evaluating ──unknowns──▶ AwaitingAnswer ──answer──▶ Evaluating
//!     │
//!     └──no unknowns──▶ Resolved
//! ```
//!
//! Each pass re-evaluates the goal from scratch against the facts gathered
//! so far. The first missing fact the pass discovers becomes the next
//! question. A goal resolves once a pass finds nothing missing; the result
//! may still be `Uncertain` or `Stub` in places.

pub mod answer;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Engine;
use crate::facts::Factlet;
use crate::question::Question;
use crate::rules::Args;
use crate::session::Session;
use crate::state::ValueState;
use crate::timeline::{AnyTimeline, ValueKind};

pub use answer::{AnswerError, AnswerSource, parse_answer};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum InterviewError {
    #[error("no question is waiting for an answer")]
    #[diagnostic(
        code(lexrule::interview::no_pending_question),
        help("Call `step()` and answer only while the interview is awaiting an answer.")
    )]
    NoPendingQuestion,

    #[error("answer for {fact} is a {actual}, but the question expects a {expected}")]
    #[diagnostic(
        code(lexrule::interview::kind_mismatch),
        help("Parse the answer with the question's value kind, e.g. via `parse_answer`.")
    )]
    KindMismatch {
        fact: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("answer for {fact} cannot be {state}")]
    #[diagnostic(
        code(lexrule::interview::unanswerable_state),
        help("An answer is a known value or Uncertain; Unstated and Stub are left to the engine.")
    )]
    UnanswerableState { fact: String, state: ValueState },

    #[error("answer source closed before the goal was resolved")]
    #[diagnostic(
        code(lexrule::interview::source_closed),
        help("The interview can be resumed by answering the pending question.")
    )]
    SourceClosed,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Answer(#[from] AnswerError),
}

pub type InterviewResult<T> = std::result::Result<T, InterviewError>;

// ---------------------------------------------------------------------------
// Goals and responses
// ---------------------------------------------------------------------------

/// The conclusion an interview is trying to reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub relationship: String,
    pub args: Args,
}

impl Goal {
    pub fn new(relationship: impl Into<String>, args: Args) -> Self {
        Self {
            relationship: relationship.into(),
            args,
        }
    }
}

/// A missing fact, ready to be asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingQuestion {
    pub factlet: Factlet,
    pub question: Question,
    /// Question text with the fact's entities filled in.
    pub text: String,
}

/// Outcome of one investigation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PendingQuestion>,
    pub goal_value: AnyTimeline,
    pub percent_complete: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterviewState {
    Evaluating,
    AwaitingAnswer(PendingQuestion),
    Resolved(AnyTimeline),
}

// ---------------------------------------------------------------------------
// Interview
// ---------------------------------------------------------------------------

/// One interview over a private session.
pub struct Interview<'e> {
    engine: &'e Engine,
    goal: Goal,
    session: Session,
    state: InterviewState,
    percent_complete: u8,
}

impl<'e> Interview<'e> {
    /// Begin an interview with an empty session in collection mode.
    pub fn start(engine: &'e Engine, goal: Goal) -> Self {
        let mut session = engine.new_session();
        session.set_collecting(true);
        tracing::info!(
            goal = %goal.relationship,
            args = %goal.args,
            "interview started"
        );
        Self {
            engine,
            goal,
            session,
            state: InterviewState::Evaluating,
            percent_complete: 0,
        }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access, e.g. to assert facts known up front.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn percent_complete(&self) -> u8 {
        self.percent_complete
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, InterviewState::Resolved(_))
    }

    /// Run one evaluation pass if one is due, and return the new state.
    ///
    /// Awaiting and resolved interviews are left as they are.
    pub fn step(&mut self) -> &InterviewState {
        if self.state != InterviewState::Evaluating {
            return &self.state;
        }
        let response = self.engine.investigate(&mut self.session, &self.goal);
        self.session.unknowns_mut().clear();
        self.percent_complete = response.percent_complete;
        self.state = match response.next {
            Some(next) if !response.complete => {
                tracing::debug!(fact = %next.factlet, "asking");
                InterviewState::AwaitingAnswer(next)
            }
            _ => {
                self.session.set_collecting(false);
                tracing::info!(
                    goal = %self.goal.relationship,
                    value = %response.goal_value,
                    "interview resolved"
                );
                InterviewState::Resolved(response.goal_value)
            }
        };
        &self.state
    }

    /// Record the answer to the pending question.
    pub fn answer(&mut self, value: AnyTimeline) -> InterviewResult<()> {
        let InterviewState::AwaitingAnswer(pending) = &self.state else {
            return Err(InterviewError::NoPendingQuestion);
        };
        if value.kind() != pending.question.kind {
            return Err(InterviewError::KindMismatch {
                fact: pending.factlet.to_string(),
                expected: pending.question.kind,
                actual: value.kind(),
            });
        }
        if let Some(state) = value.unanswerable_state() {
            return Err(InterviewError::UnanswerableState {
                fact: pending.factlet.to_string(),
                state,
            });
        }
        let factlet = pending.factlet.clone();
        self.session.assert_any(factlet, value);
        self.state = InterviewState::Evaluating;
        Ok(())
    }

    /// Parse and record a raw text answer.
    pub fn answer_text(&mut self, raw: &str) -> InterviewResult<()> {
        let InterviewState::AwaitingAnswer(pending) = &self.state else {
            return Err(InterviewError::NoPendingQuestion);
        };
        let value = parse_answer(pending.question.kind, raw)?;
        self.answer(value)
    }

    /// Record that the answer to the pending question is not known.
    pub fn decline(&mut self) -> InterviewResult<()> {
        let InterviewState::AwaitingAnswer(pending) = &self.state else {
            return Err(InterviewError::NoPendingQuestion);
        };
        let kind = pending.question.kind;
        self.answer(AnyTimeline::of_state(kind, ValueState::Uncertain))
    }

    /// Drive the interview to resolution, asking `source` for every answer.
    ///
    /// Unparseable answers are re-asked up to the configured number of
    /// attempts, after which the fact is recorded as `Uncertain`.
    pub fn run(&mut self, source: &mut impl AnswerSource) -> InterviewResult<AnyTimeline> {
        let max_attempts = self.engine.config().max_answer_attempts;
        loop {
            let pending = match self.step() {
                InterviewState::Resolved(value) => return Ok(value.clone()),
                InterviewState::AwaitingAnswer(pending) => pending.clone(),
                InterviewState::Evaluating => continue,
            };

            let mut answered = false;
            for attempt in 1..=max_attempts {
                let raw = source
                    .ask(&pending, attempt, self.percent_complete)
                    .ok_or(InterviewError::SourceClosed)?;
                match parse_answer(pending.question.kind, &raw) {
                    Ok(value) => {
                        self.answer(value)?;
                        answered = true;
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(fact = %pending.factlet, attempt, error = %e, "answer rejected");
                        source.reject(&pending, &e);
                    }
                }
            }
            if !answered {
                tracing::warn!(
                    fact = %pending.factlet,
                    attempts = max_attempts,
                    "no usable answer, recording Uncertain"
                );
                self.decline()?;
            }
        }
    }
}
