// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # lexrule
//!
//! A temporal rule engine for legal and policy logic. Every value is a
//! timeline that may change over time and may be unknown in several
//! distinct ways. Rules combine timelines pointwise, and an interview loop
//! asks for the missing facts one at a time until a goal is decided.
//!
//! ## Architecture
//!
//! - **Values** (`state`, `timeline`): the five-state value lattice and
//!   piecewise-constant timelines with a pointwise combinator
//! - **Operators** (`ops`, `time`, `switch`): logic, comparison, arithmetic
//!   and set operators, elapsed-time measures over period partitions, and
//!   first-match conditional assignment
//! - **Facts** (`facts`, `session`): per-interview fact store and the
//!   bounded list of missing facts
//! - **Rules** (`rules`, `question`): the rule registry, evaluation context
//!   and question metadata
//! - **Interviews** (`engine`, `interview`): evaluate, ask, assert, repeat
//!
//! ## Library usage
//!
//! ```
//! use lexrule::config::InterviewConfig;
//! use lexrule::engine::Engine;
//! use lexrule::entity::Entity;
//! use lexrule::facts::Factlet;
//! use lexrule::question::QuestionBook;
//! use lexrule::rules::{Args, Eval, RuleBook};
//! use lexrule::timeline::{AnyTimeline, BoolTimeline};
//!
//! let mut rules = RuleBook::new();
//! rules.register("isEligible", |e: &mut Eval<'_>, a: &Args| {
//!     let license: BoolTimeline = e.input(&a.first, "hasLicense");
//!     license.and(&e.input(&a.first, "hasIncome"))
//! });
//! let engine = Engine::new(InterviewConfig::default(), rules, QuestionBook::new()).unwrap();
//!
//! let mut session = engine.new_session();
//! session.assert(Factlet::new("Ann", "hasLicense"), BoolTimeline::eternal(false));
//! let goal = engine.goal("isEligible", &[Entity::new("Ann")]).unwrap();
//! let response = engine.investigate(&mut session, &goal);
//! assert_eq!(response.goal_value, AnyTimeline::from(BoolTimeline::eternal(false)));
//! ```

pub mod config;
pub mod demo;
pub mod engine;
pub mod entity;
pub mod error;
pub mod facts;
pub mod interview;
pub mod ops;
pub mod question;
pub mod rules;
pub mod session;
pub mod state;
pub mod switch;
pub mod time;
pub mod timeline;

pub use engine::Engine;
pub use error::{LexError, LexResult};
pub use state::{Value, ValueState};
pub use timeline::{AnyTimeline, Timeline};
