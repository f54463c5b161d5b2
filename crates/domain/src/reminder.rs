use crate::recurrence::RecurrencePattern;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A `Reminder` is one concrete due occurrence. A recurring series is a
/// chain of such records linked only by field copying: completing or
/// skipping an occurrence creates a fresh record with a fresh identity,
/// the predecessor is only ever mutated in `status` and `completed_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Wall-clock due time in the reminder's own timezone. All recurrence
    /// arithmetic happens on these naive components; `timezone` below is a
    /// display label and is never used to normalize to UTC.
    pub due_at: NaiveDateTime,
    pub timezone: String,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrencePattern>,
    pub status: ReminderStatus,
    /// Set exactly once, when `status` transitions to `Completed`
    pub completed_at: Option<NaiveDateTime>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub natural_language_input: Option<String>,
    pub parsed_by_ai: bool,
    /// Confidence of the AI parse as a percentage (0-100)
    pub ai_confidence: Option<i64>,
    /// Stored for bookkeeping but never read by the scheduler, so a
    /// reminder that stays `Pending` across several ticks inside the
    /// lookahead window can be notified more than once.
    pub last_notified_at: Option<NaiveDateTime>,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    /// One-line notification summary: priority flag, title, due time,
    /// description, location and tags joined by a fixed separator.
    pub fn notification_message(&self) -> String {
        let mut parts = Vec::new();

        if let Priority::High = self.priority {
            parts.push("HIGH PRIORITY".to_string());
        }
        parts.push(format!("REMINDER: {}", self.title));
        parts.push(format!("Due: {}", self.due_at.format("%Y-%m-%d %H:%M")));
        if let Some(description) = &self.description {
            parts.push(description.clone());
        }
        if let Some(location) = &self.location {
            parts.push(format!("Location: {}", location));
        }
        if !self.tags.is_empty() {
            parts.push(format!("Tags: {}", self.tags.join(", ")));
        }

        parts.join(" | ")
    }

    /// Synthesizes the successor record for a recurring series: every
    /// non-temporal field is copied verbatim, the identity is fresh and
    /// the status starts over at `Pending`.
    pub fn next_occurrence_at(&self, due_at: NaiveDateTime, now_millis: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_at,
            timezone: self.timezone.clone(),
            is_recurring: self.is_recurring,
            recurrence: self.recurrence.clone(),
            status: ReminderStatus::Pending,
            completed_at: None,
            priority: self.priority,
            tags: self.tags.clone(),
            location: self.location.clone(),
            natural_language_input: self.natural_language_input.clone(),
            parsed_by_ai: self.parsed_by_ai,
            ai_confidence: self.ai_confidence,
            last_notified_at: None,
            created: now_millis,
            updated: now_millis,
        }
    }
}
