//! Typed operators on timelines.
//!
//! Operators are inherent methods on `Timeline<T>` for the payload types they
//! apply to, so rule bodies read left to right:
//!
//! ```
//! use lexrule::timeline::{BoolTimeline, NumTimeline};
//!
//! let income = NumTimeline::eternal(42_000.0);
//! let licensed = BoolTimeline::eternal(true);
//! let eligible = licensed.and(&income.gt(&NumTimeline::eternal(30_000.0)));
//! assert_eq!(eligible, BoolTimeline::eternal(true));
//! ```

pub mod arith;
pub mod compare;
pub mod logic;
pub mod set;
