use actix_web::web;

mod complete_reminder;
mod create_reminder;
mod delete_reminder;
pub mod get_due_reminders;
mod get_reminder;
mod get_reminders_by_user;
mod occurrence;
mod skip_reminder;
mod snooze_reminder;

use complete_reminder::complete_reminder_controller;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders_by_user::get_reminders_by_user_controller;
use skip_reminder::skip_reminder_controller;
use snooze_reminder::snooze_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Create a reminder
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    // Get a reminder
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    // Delete a reminder
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    // List reminders for a user
    cfg.route(
        "/users/{user_id}/reminders",
        web::get().to(get_reminders_by_user_controller),
    );
    // Complete a reminder and chain the next occurrence when recurring
    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
    // Skip a recurring reminder forward
    cfg.route(
        "/reminders/{reminder_id}/skip",
        web::post().to(skip_reminder_controller),
    );
    // Push a reminder's due time forward without touching recurrence
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
}
