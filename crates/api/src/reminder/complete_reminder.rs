use super::occurrence::{create_next_occurrence, should_create_next};
use crate::error::RemindrError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remindr_api_structs::complete_reminder::*;
use remindr_domain::{Reminder, ReminderStatus, ID};
use remindr_infra::RemindrContext;

pub async fn complete_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let usecase = CompleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, res.next_occurrence)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct CompletedReminder {
    pub reminder: Reminder,
    /// The successor occurrence, present only when this reminder is
    /// recurring and chaining succeeded
    pub next_occurrence: Option<Reminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = CompletedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        let now = ctx.sys.now();
        reminder.status = ReminderStatus::Completed;
        reminder.completed_at = Some(now);
        reminder.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // Chaining is best-effort: the completion above stays committed
        // even when no successor can be created.
        let next_occurrence = if should_create_next(&reminder, now) {
            create_next_occurrence(&reminder, ctx).await
        } else {
            None
        };

        Ok(CompletedReminder {
            reminder,
            next_occurrence,
        })
    }
}
