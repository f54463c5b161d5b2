mod notification;

pub use notification::{
    ConsoleNotifier, EmailNotifier, FileNotifier, INotifier, NotificationDispatcher,
    WebhookNotifier,
};
