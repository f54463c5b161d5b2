use chrono::NaiveDateTime;
use remindr_domain::{next_occurrence, Reminder, ReminderStatus};
use remindr_infra::RemindrContext;
use tracing::{error, info, warn};

/// Whether completing this reminder should chain a successor occurrence:
/// it must be recurring with a pattern, the completion must already be
/// committed, and the series must not have reached its end date.
pub(crate) fn should_create_next(reminder: &Reminder, now: NaiveDateTime) -> bool {
    if !reminder.is_recurring {
        return false;
    }
    let pattern = match &reminder.recurrence {
        Some(pattern) => pattern,
        None => return false,
    };
    if reminder.status != ReminderStatus::Completed {
        return false;
    }
    if let Some(end_date) = pattern.end_date {
        if now >= end_date {
            info!(
                "Recurrence ended (end date reached) for reminder: {}",
                reminder.id
            );
            return false;
        }
    }
    true
}

/// Best-effort creation of the successor occurrence. Every failure mode
/// collapses to "no successor created" with a log line; the caller's
/// primary state transition stays committed either way.
pub(crate) async fn create_next_occurrence(
    reminder: &Reminder,
    ctx: &RemindrContext,
) -> Option<Reminder> {
    let pattern = reminder.recurrence.as_ref()?;

    let due_at = match next_occurrence(reminder.due_at, pattern) {
        Some(due_at) => due_at,
        None => {
            warn!(
                "Could not calculate next occurrence for reminder: {}",
                reminder.id
            );
            return None;
        }
    };

    let successor = reminder.next_occurrence_at(due_at, ctx.sys.get_timestamp_millis());
    match ctx.repos.reminders.insert(&successor).await {
        Ok(()) => {
            info!(
                "Created next occurrence: {} (from {}), due at {}",
                successor.id, reminder.id, successor.due_at
            );
            Some(successor)
        }
        Err(e) => {
            error!(
                "Failed to create next occurrence for reminder {}: {:?}",
                reminder.id, e
            );
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use remindr_domain::{Frequency, Priority, RecurrencePattern};

    fn recurring_reminder(status: ReminderStatus, pattern: RecurrencePattern) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: "alice".into(),
            title: "Pay rent".into(),
            description: None,
            due_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            timezone: "UTC".into(),
            is_recurring: true,
            recurrence: Some(pattern),
            status,
            completed_at: None,
            priority: Priority::Medium,
            tags: vec![],
            location: None,
            natural_language_input: None,
            parsed_by_ai: false,
            ai_confidence: None,
            last_notified_at: None,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn requires_recurrence_and_committed_completion() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let mut reminder =
            recurring_reminder(ReminderStatus::Completed, RecurrencePattern::default());
        assert!(should_create_next(&reminder, now));

        reminder.status = ReminderStatus::Pending;
        assert!(!should_create_next(&reminder, now));

        reminder.status = ReminderStatus::Completed;
        reminder.is_recurring = false;
        assert!(!should_create_next(&reminder, now));

        reminder.is_recurring = true;
        reminder.recurrence = None;
        assert!(!should_create_next(&reminder, now));
    }

    #[test]
    fn exhausted_end_date_stays_exhausted() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let pattern = RecurrencePattern {
            frequency: Frequency::Daily,
            end_date: Some(now - Duration::days(1)),
            ..Default::default()
        };
        let reminder = recurring_reminder(ReminderStatus::Completed, pattern);

        // Once "now" has passed the end date the answer never flips back.
        for offset in 0..5 {
            assert!(!should_create_next(&reminder, now + Duration::hours(offset)));
        }
    }

    #[test]
    fn end_date_in_future_allows_next() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let pattern = RecurrencePattern {
            frequency: Frequency::Daily,
            end_date: Some(now + Duration::days(30)),
            ..Default::default()
        };
        let reminder = recurring_reminder(ReminderStatus::Completed, pattern);
        assert!(should_create_next(&reminder, now));
    }
}
