use crate::error::RemindrError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::Duration;
use remindr_api_structs::snooze_reminder::*;
use remindr_domain::{Reminder, ID};
use remindr_infra::RemindrContext;
use tracing::info;

const DEFAULT_SNOOZE_MINUTES: i64 = 30;

pub async fn snooze_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let usecase = SnoozeReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        minutes: body.minutes.unwrap_or(DEFAULT_SNOOZE_MINUTES),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub reminder_id: ID,
    pub minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSnoozeDuration(i64),
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidSnoozeDuration(minutes) => Self::BadClientData(format!(
                "Invalid snooze duration specified: {} minutes",
                minutes
            )),
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        if self.minutes < 1 {
            return Err(UseCaseError::InvalidSnoozeDuration(self.minutes));
        }

        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        // The snooze moves the same occurrence, no new identity is created
        // and recurrence plays no part.
        reminder.due_at = ctx.sys.now() + Duration::minutes(self.minutes);
        reminder.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        info!(
            "Snoozed reminder {} for {} minutes, new due time: {}",
            reminder.id, self.minutes, reminder.due_at
        );

        Ok(reminder)
    }
}
