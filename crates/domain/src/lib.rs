mod recurrence;
mod reminder;
mod shared;

pub use recurrence::{next_occurrence, Frequency, RecurrencePattern};
pub use reminder::{Priority, Reminder, ReminderStatus};
pub use shared::entity::{Entity, ID};
