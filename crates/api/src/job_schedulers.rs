use crate::{reminder::get_due_reminders::GetDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use remindr_infra::{NotificationDispatcher, RemindrContext};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Seconds until the next whole minute, so that the first poll lands on
/// a minute boundary like a cron job would.
pub fn secs_to_next_minute(now_ts: usize) -> usize {
    60 - (now_ts / 1000) % 60
}

/// Background job that polls for due reminders and hands them to the
/// notification dispatcher. One tick per `poll_interval_minutes`.
pub struct ReminderPoller {
    ctx: RemindrContext,
    dispatcher: Arc<NotificationDispatcher>,
    handle: Option<actix_web::rt::task::JoinHandle<()>>,
}

impl ReminderPoller {
    pub fn new(ctx: RemindrContext, dispatcher: NotificationDispatcher) -> Self {
        Self {
            ctx,
            dispatcher: Arc::new(dispatcher),
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(&mut self) {
        if self.is_running() {
            warn!("Reminder poller is already running");
            return;
        }

        let ctx = self.ctx.clone();
        let dispatcher = self.dispatcher.clone();
        let tick_secs = ctx.config.poll_interval_minutes * 60;

        self.handle = Some(actix_web::rt::spawn(async move {
            let now = ctx.sys.get_timestamp_millis();
            let secs_to_next_run = secs_to_next_minute(now as usize);
            let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
            sleep_until(start).await;

            info!(
                "Reminder poller started, checking every {} minute(s)",
                ctx.config.poll_interval_minutes
            );
            let mut poll_interval = interval(Duration::from_secs(tick_secs));
            loop {
                poll_interval.tick().await;
                check_due_reminders(&ctx, &dispatcher).await;
            }
        }));
    }

    pub fn stop(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                info!("Reminder poller stopped");
            }
            None => warn!("Reminder poller is not running"),
        }
    }
}

/// One poller tick. A failing lookup or handler never takes the loop
/// down with it.
pub async fn check_due_reminders(ctx: &RemindrContext, dispatcher: &NotificationDispatcher) {
    let due_reminders = match execute(GetDueRemindersUseCase {}, ctx).await {
        Ok(reminders) => reminders,
        Err(e) => {
            error!("Unable to query due reminders: {:?}", e);
            return;
        }
    };

    if due_reminders.is_empty() {
        return;
    }
    info!("Found {} due reminder(s)", due_reminders.len());

    for reminder in &due_reminders {
        dispatcher.dispatch(reminder).await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use remindr_domain::{Priority, Reminder, ReminderStatus, ID};
    use remindr_infra::{Config, FakeSys, INotifier, IReminderRepo, Repos};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn start_delay_lands_on_the_next_minute() {
        assert_eq!(secs_to_next_minute(50 * 1000), 10);
        assert_eq!(secs_to_next_minute(59 * 1000), 1);
        assert_eq!(secs_to_next_minute(60 * 1000), 60);
        assert_eq!(secs_to_next_minute(61 * 1000), 59);
    }

    struct RecordingNotifier {
        titles: std::sync::Mutex<Vec<String>>,
        count: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl INotifier for RecordingNotifier {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn notify(&self, reminder: &Reminder, _message: &str) -> anyhow::Result<()> {
            self.titles.lock().unwrap().push(reminder.title.clone());
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn reminder(title: &str, due_at: NaiveDateTime) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: "alice".into(),
            title: title.into(),
            description: None,
            due_at,
            timezone: "UTC".into(),
            is_recurring: false,
            recurrence: None,
            status: ReminderStatus::Pending,
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

    #[actix_web::test]
    async fn tick_dispatches_only_reminders_inside_the_window() {
        let ctx = RemindrContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(FakeSys(now())),
        };
        let due_soon = reminder("in three minutes", now() + Duration::minutes(3));
        let due_later = reminder("in ten minutes", now() + Duration::minutes(10));
        ctx.repos.reminders.insert(&due_soon).await.unwrap();
        ctx.repos.reminders.insert(&due_later).await.unwrap();

        let notifier = Arc::new(RecordingNotifier {
            titles: std::sync::Mutex::new(vec![]),
            count: AtomicUsize::new(0),
        });
        let mut dispatcher = NotificationDispatcher::new(vec![]);
        dispatcher.add_notifier(notifier.clone());

        check_due_reminders(&ctx, &dispatcher).await;

        assert_eq!(notifier.count.load(Ordering::SeqCst), 1);
        assert_eq!(
            *notifier.titles.lock().unwrap(),
            vec!["in three minutes".to_string()]
        );
    }

    struct BrokenReminderRepo {}

    #[async_trait::async_trait]
    impl IReminderRepo for BrokenReminderRepo {
        async fn insert(&self, _reminder: &Reminder) -> anyhow::Result<()> {
            Ok(())
        }

        async fn save(&self, _reminder: &Reminder) -> anyhow::Result<()> {
            Ok(())
        }

        async fn find(&self, _reminder_id: &ID) -> Option<Reminder> {
            None
        }

        async fn find_by_user(&self, _user_id: &str) -> Vec<Reminder> {
            vec![]
        }

        async fn find_due(
            &self,
            _status: ReminderStatus,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> anyhow::Result<Vec<Reminder>> {
            Err(anyhow::anyhow!("storage is down"))
        }

        async fn delete(&self, _reminder_id: &ID) -> Option<Reminder> {
            None
        }
    }

    #[actix_web::test]
    async fn tick_survives_a_failing_due_query() {
        let ctx = RemindrContext {
            repos: Repos {
                reminders: Arc::new(BrokenReminderRepo {}),
            },
            config: Config::new(),
            sys: Arc::new(FakeSys(now())),
        };
        let notifier = Arc::new(RecordingNotifier {
            titles: std::sync::Mutex::new(vec![]),
            count: AtomicUsize::new(0),
        });
        let mut dispatcher = NotificationDispatcher::new(vec![]);
        dispatcher.add_notifier(notifier.clone());

        // The tick logs the error and returns, nothing is dispatched.
        check_due_reminders(&ctx, &dispatcher).await;

        assert_eq!(notifier.count.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn start_and_stop_are_idempotent() {
        let ctx = RemindrContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(FakeSys(now())),
        };
        let mut poller = ReminderPoller::new(ctx, NotificationDispatcher::new(vec![]));
        assert!(!poller.is_running());

        poller.start();
        assert!(poller.is_running());
        // A second start keeps the original task.
        poller.start();
        assert!(poller.is_running());

        poller.stop();
        assert!(!poller.is_running());
        poller.stop();
        assert!(!poller.is_running());
    }
}
