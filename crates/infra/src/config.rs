use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the due-reminder poller ticks, in minutes
    pub poll_interval_minutes: u64,
    /// Lookahead window in millis for the due-reminder query. Every poll
    /// tick considers reminders with a due time inside `[now, now + this]`.
    /// Fixed at five minutes, independent of the poll interval.
    pub due_lookahead_millis: i64,
    /// File to append notifications to, enables the file channel when set
    pub notify_file_path: Option<String>,
    /// Endpoint to POST due-reminder payloads to, enables the webhook
    /// channel when set
    pub notify_webhook_url: Option<String>,
    /// Outbound email settings, enables the email channel when complete
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let default_poll_interval = "1";
        let poll_interval_minutes =
            std::env::var("POLL_INTERVAL_MINUTES").unwrap_or_else(|_| default_poll_interval.into());
        let poll_interval_minutes = match poll_interval_minutes.parse::<u64>() {
            Ok(interval) if interval >= 1 => interval,
            _ => {
                warn!(
                    "The given POLL_INTERVAL_MINUTES: {} is not a positive integer, falling back to the default: {}.",
                    poll_interval_minutes, default_poll_interval
                );
                1
            }
        };

        let email = match (
            std::env::var("EMAIL_API_URL"),
            std::env::var("EMAIL_API_KEY"),
            std::env::var("EMAIL_FROM"),
            std::env::var("EMAIL_TO"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(from), Ok(to)) => Some(EmailConfig {
                api_url,
                api_key,
                from,
                to,
            }),
            _ => {
                info!("Email notifications disabled (EMAIL_* not fully configured)");
                None
            }
        };

        Self {
            port,
            poll_interval_minutes,
            due_lookahead_millis: 1000 * 60 * 5, // 5 minutes
            notify_file_path: std::env::var("NOTIFY_FILE_PATH").ok(),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").ok(),
            email,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
