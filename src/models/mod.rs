pub mod checkmark;
pub mod day_completion;
pub mod habit;
pub mod note;

pub use checkmark::{Checkmark, CheckmarkStatus, ToggleRequest};
pub use day_completion::DayCompletion;
pub use habit::{Habit, HabitWithStatus, NewHabitRequest, UpdateHabitRequest};
pub use note::{NewNoteRequest, Note, UpdateNoteRequest};
