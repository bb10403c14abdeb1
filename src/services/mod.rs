pub mod checkmarks;
pub mod day_completion;

pub use checkmarks::{CheckmarkService, ToggleOutcome};
pub use day_completion::{CompletedHabit, DayCompletionService, DayDetail};
