use crate::error::RemindrError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use remindr_api_structs::create_reminder::*;
use remindr_domain::{Priority, RecurrencePattern, Reminder, ReminderStatus};
use remindr_infra::RemindrContext;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: body.user_id,
        title: body.title,
        description: body.description,
        due_at: body.due_at,
        timezone: body.timezone.unwrap_or_else(|| "UTC".into()),
        priority: body.priority.unwrap_or_default(),
        tags: body.tags.unwrap_or_default(),
        location: body.location,
        recurrence: body.recurrence,
        natural_language_input: body.natural_language_input,
        parsed_by_ai: body.parsed_by_ai.unwrap_or(false),
        ai_confidence: body.ai_confidence,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_at: NaiveDateTime,
    pub timezone: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub recurrence: Option<RecurrencePattern>,
    pub natural_language_input: Option<String>,
    pub parsed_by_ai: bool,
    pub ai_confidence: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidRecurrenceRule,
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("A title must be provided".into()),
            UseCaseError::InvalidRecurrenceRule => {
                Self::BadClientData("Invalid recurrence rule specified for the reminder".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        // A reminder is recurring exactly when it carries a valid pattern
        if let Some(pattern) = &self.recurrence {
            if !pattern.is_valid() {
                return Err(UseCaseError::InvalidRecurrenceRule);
            }
        }

        let reminder = Reminder {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_at: self.due_at,
            timezone: self.timezone.clone(),
            is_recurring: self.recurrence.is_some(),
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
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
