use crate::shared::usecase::UseCase;
use chrono::Duration;
use remindr_domain::{Reminder, ReminderStatus};
use remindr_infra::RemindrContext;

/// Fetches the pending reminders entering the notification window.
/// Runs on every poller tick.
#[derive(Debug)]
pub struct GetDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDueReminders";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let window_end = now + Duration::milliseconds(ctx.config.due_lookahead_millis);

        ctx.repos
            .reminders
            .find_due(ReminderStatus::Pending, now, window_end)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
