use crate::config::{Config, EmailConfig};
use chrono::{Local, Utc};
use remindr_domain::Reminder;
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info};

/// A notification channel. Implementations are pure side-effect sinks: the
/// dispatcher ignores everything about the outcome except logging failures.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn notify(&self, reminder: &Reminder, message: &str) -> anyhow::Result<()>;
}

/// Prints the notification to stdout
pub struct ConsoleNotifier {}

#[async_trait::async_trait]
impl INotifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn notify(&self, _reminder: &Reminder, message: &str) -> anyhow::Result<()> {
        println!("\n{}", "=".repeat(80));
        println!("{}", message);
        println!("{}\n", "=".repeat(80));
        Ok(())
    }
}

/// Appends timestamped notification lines to a log file
pub struct FileNotifier {
    path: String,
}

impl FileNotifier {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl INotifier for FileNotifier {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn notify(&self, _reminder: &Reminder, message: &str) -> anyhow::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}] {}", timestamp, message)?;
        Ok(())
    }
}

/// POSTs a JSON payload with the reminder fields and the rendered message
/// to a configured endpoint
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn notify(&self, reminder: &Reminder, message: &str) -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "reminderId": reminder.id.as_string(),
            "title": reminder.title,
            "description": reminder.description,
            "dueAt": reminder.due_at,
            "priority": reminder.priority,
            "tags": reminder.tags,
            "location": reminder.location,
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Sends the notification through an HTTP mail API
pub struct EmailNotifier {
    config: EmailConfig,
    client: reqwest::Client,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, reminder: &Reminder, message: &str) -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "from": self.config.from,
            "to": self.config.to,
            "subject": format!("Reminder: {}", reminder.title),
            "text": message,
        });

        self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Fan-out of a due reminder to every registered channel. Channels run
/// sequentially; a failing channel is logged with its name and does not
/// keep the remaining channels from running.
pub struct NotificationDispatcher {
    notifiers: Vec<Arc<dyn INotifier>>,
}

impl NotificationDispatcher {
    pub fn new(notifiers: Vec<Arc<dyn INotifier>>) -> Self {
        Self { notifiers }
    }

    /// Channel set derived from the environment: console always, file /
    /// webhook / email when configured
    pub fn from_config(config: &Config) -> Self {
        let mut dispatcher = Self::new(vec![Arc::new(ConsoleNotifier {})]);
        if let Some(path) = &config.notify_file_path {
            dispatcher.add_notifier(Arc::new(FileNotifier::new(path.clone())));
        }
        if let Some(url) = &config.notify_webhook_url {
            dispatcher.add_notifier(Arc::new(WebhookNotifier::new(url.clone())));
        }
        if let Some(email) = &config.email {
            dispatcher.add_notifier(Arc::new(EmailNotifier::new(email.clone())));
        }
        dispatcher
    }

    pub fn add_notifier(&mut self, notifier: Arc<dyn INotifier>) {
        info!("Added notification handler: {}", notifier.name());
        self.notifiers.push(notifier);
    }

    pub async fn dispatch(&self, reminder: &Reminder) {
        let message = reminder.notification_message();

        if self.notifiers.is_empty() {
            info!("REMINDER: {}", message);
            return;
        }

        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(reminder, &message).await {
                error!(
                    "Notification handler {} failed for reminder {}: {:?}",
                    notifier.name(),
                    reminder.id,
                    e
                );
            }
        }
    }
}
