mod inmemory;

pub use inmemory::InMemoryReminderRepo;

use chrono::NaiveDateTime;
use remindr_domain::{Reminder, ReminderStatus, ID};

/// Storage port for `Reminder` rows. The scheduling core only ever talks
/// to this trait; the engine behind it is an external concern.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &str) -> Vec<Reminder>;
    /// Reminders with the given status whose due time falls inside the
    /// inclusive `[start, end]` window
    async fn find_due(
        &self,
        status: ReminderStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}
