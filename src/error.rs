//! Diagnostic error types for lexrule.
//!
//! Rule evaluation itself never fails: missing or contradictory data shows
//! up as `Unstated`, `Stub` or `Uncertain` values in the result timeline.
//! Errors are reserved for the surfaces around it, such as configuration,
//! answer parsing, the interview protocol and goal lookup.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::interview::{AnswerError, InterviewError};

/// Top-level error type for lexrule.
///
/// Each variant wraps a subsystem error, keeping its diagnostic code and
/// help text intact.
#[derive(Debug, Error, Diagnostic)]
pub enum LexError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Answer(#[from] AnswerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Interview(#[from] InterviewError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("no rule concludes \"{name}\"")]
    #[diagnostic(
        code(lexrule::engine::unknown_goal),
        help("List the relationships that can be used as goals with `lexrule goals`.")
    )]
    UnknownGoal { name: String },

    #[error("goal \"{name}\" needs one to three entities, got {given}")]
    #[diagnostic(
        code(lexrule::engine::bad_arity),
        help("Pass the entities the goal is about, e.g. `lexrule interview isEligible Ann`.")
    )]
    BadArity { name: String, given: usize },
}

/// Convenience alias for functions returning lexrule results.
pub type LexResult<T> = std::result::Result<T, LexError>;
