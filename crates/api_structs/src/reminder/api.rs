use crate::dtos::ReminderDTO;
use chrono::NaiveDateTime;
use remindr_domain::{Priority, RecurrencePattern, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

/// Response for the lifecycle operations that may chain a recurring
/// series: the mutated reminder plus the successor, when one was created
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderWithSuccessorResponse {
    pub reminder: ReminderDTO,
    pub next_occurrence: Option<ReminderDTO>,
}

impl ReminderWithSuccessorResponse {
    pub fn new(reminder: Reminder, next_occurrence: Option<Reminder>) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
            next_occurrence: next_occurrence.map(ReminderDTO::new),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        pub title: String,
        pub description: Option<String>,
        pub due_at: NaiveDateTime,
        pub timezone: Option<String>,
        pub priority: Option<Priority>,
        pub tags: Option<Vec<String>>,
        pub location: Option<String>,
        pub recurrence: Option<RecurrencePattern>,
        pub natural_language_input: Option<String>,
        pub parsed_by_ai: Option<bool>,
        pub ai_confidence: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders_by_user {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod complete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderWithSuccessorResponse;
}

pub mod skip_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderWithSuccessorResponse;
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub minutes: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}
