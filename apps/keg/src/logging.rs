//! Structured logging integration for events
//!
//! Every event the CLI receives is forwarded to `tracing`, whether or not
//! it is rendered on the terminal.

use keg_events::{AppEvent, GeneralEvent, InstallEvent, PreflightEvent};
use tracing::{debug, error, info, trace, warn, Level};

/// Log an `AppEvent` at its own level with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let target = event.log_target();
    match event {
        AppEvent::Install(InstallEvent::Started { package, version }) => {
            info!(source = target, package = %package, version = %version, "Install started");
        }
        AppEvent::Install(InstallEvent::Completed { package, version }) => {
            info!(source = target, package = %package, version = %version, "Install completed");
        }
        AppEvent::Install(InstallEvent::Failed { package, failure }) => {
            error!(
                source = target,
                package = %package,
                retryable = failure.retryable,
                code = ?failure.code,
                message = %failure.message,
                hint = ?failure.hint,
                "Install failed"
            );
        }
        AppEvent::Install(InstallEvent::AlreadyAttempted { package }) => {
            debug!(source = target, package = %package, "Already attempted in this request");
        }
        AppEvent::Install(InstallEvent::BatchStarted {
            operation_id,
            packages,
        }) => {
            info!(
                source = target,
                operation_id = %operation_id,
                packages = ?packages,
                "Install request started"
            );
        }
        AppEvent::Install(InstallEvent::BatchCompleted {
            operation_id,
            installed,
            failed,
            duration_ms,
        }) => {
            info!(
                source = target,
                operation_id = %operation_id,
                installed = installed,
                failed = failed,
                duration_ms = duration_ms,
                "Install request completed"
            );
        }
        AppEvent::Preflight(PreflightEvent::CheckFailed { check, failure }) => {
            error!(
                source = target,
                check = %check,
                code = ?failure.code,
                message = %failure.message,
                "Preflight check failed"
            );
        }
        AppEvent::Preflight(PreflightEvent::CheckWarned { check, message }) => {
            warn!(source = target, check = %check, message = %message, "Preflight warning");
        }
        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            warn!(source = target, message = %message, context = ?context, "Warning");
        }
        AppEvent::General(GeneralEvent::Error { message, details }) => {
            error!(source = target, message = %message, details = ?details, "Error");
        }
        AppEvent::General(GeneralEvent::DebugLog { message, context }) => {
            debug!(source = target, message = %message, context = ?context, "Debug log");
        }
        _ => match event.log_level() {
            Level::ERROR => error!(source = target, event = ?event, "Application event"),
            Level::WARN => warn!(source = target, event = ?event, "Application event"),
            Level::INFO => info!(source = target, event = ?event, "Application event"),
            Level::DEBUG => debug!(source = target, event = ?event, "Application event"),
            _ => trace!(source = target, event = ?event, "Application event"),
        },
    }
}
