use super::occurrence::create_next_occurrence;
use crate::error::RemindrError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remindr_api_structs::skip_reminder::*;
use remindr_domain::{Reminder, ReminderStatus, ID};
use remindr_infra::RemindrContext;
use tracing::warn;

pub async fn skip_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let usecase = SkipReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, res.next_occurrence)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub struct SkipReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct SkippedReminder {
    pub reminder: Reminder,
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
impl UseCase for SkipReminderUseCase {
    type Response = SkippedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SkipReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        // Only a recurring reminder can be skipped forward
        if !reminder.is_recurring {
            warn!("Cannot skip non-recurring reminder: {}", reminder.id);
            return Ok(SkippedReminder {
                reminder,
                next_occurrence: None,
            });
        }

        // The skip is cancellation without completion: `completed_at`
        // stays unset.
        reminder.status = ReminderStatus::Cancelled;
        reminder.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let next_occurrence = create_next_occurrence(&reminder, ctx).await;

        Ok(SkippedReminder {
            reminder,
            next_occurrence,
        })
    }
}
