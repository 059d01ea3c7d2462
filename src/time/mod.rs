//! Calendar partitions and elapsed-time operators.

pub mod elapsed;
pub mod partition;

pub use elapsed::{
    continuous_elapsed_per, continuous_elapsed_per_past, running_elapsed_per, total_elapsed_days,
    total_elapsed_days_per, total_elapsed_years,
};
pub use partition::{is_at_or_after, is_before, is_between};
