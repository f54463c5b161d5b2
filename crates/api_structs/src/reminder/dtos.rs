use chrono::NaiveDateTime;
use remindr_domain::{Priority, RecurrencePattern, Reminder, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_at: NaiveDateTime,
    pub timezone: String,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrencePattern>,
    pub status: ReminderStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub natural_language_input: Option<String>,
    pub parsed_by_ai: bool,
    pub ai_confidence: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            user_id: reminder.user_id,
            title: reminder.title,
            description: reminder.description,
            due_at: reminder.due_at,
            timezone: reminder.timezone,
            is_recurring: reminder.is_recurring,
            recurrence: reminder.recurrence,
            status: reminder.status,
            completed_at: reminder.completed_at,
            priority: reminder.priority,
            tags: reminder.tags,
            location: reminder.location,
            natural_language_input: reminder.natural_language_input,
            parsed_by_ai: reminder.parsed_by_ai,
            ai_confidence: reminder.ai_confidence,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
