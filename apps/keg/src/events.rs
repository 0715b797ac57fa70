//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::style;
use keg_events::{AppEvent, FailureContext, GeneralEvent, InstallEvent, PreflightEvent};

/// Renders the events users should see and logs all of them
pub struct EventHandler {
    colors_enabled: bool,
    json_mode: bool,
    debug_enabled: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, json_mode: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            json_mode,
            debug_enabled,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        // JSON output must stay machine readable
        if self.json_mode {
            return;
        }

        match event {
            AppEvent::General(general) => self.handle_general(general),
            AppEvent::Preflight(PreflightEvent::CheckWarned { message, .. }) => {
                self.show_warning(&message);
            }
            AppEvent::Install(install) => self.handle_install(install),
            // Passed checks stay quiet and a fatal one comes back as the request error
            AppEvent::Preflight(_) => {}
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => {
                self.show_warning(&message);
                if let Some(context) = context {
                    eprintln!("  {context}");
                }
            }
            GeneralEvent::Error { message, details } => {
                self.show_error(&message);
                if let Some(details) = details {
                    eprintln!("  {details}");
                }
            }
            GeneralEvent::DebugLog { message, .. } if self.debug_enabled => {
                eprintln!("{}", self.dim(&format!("debug: {message}")));
            }
            _ => {}
        }
    }

    fn handle_install(&self, event: InstallEvent) {
        match event {
            InstallEvent::Started { package, version } => {
                self.show_header(&format!("Installing {package} {version}"));
            }
            InstallEvent::Caveats { caveats, .. } => {
                self.show_header("Caveats");
                for caveat in caveats {
                    println!("{caveat}");
                }
            }
            InstallEvent::Completed { package, version } => {
                println!("{}", self.success(&format!("{package} {version} installed")));
            }
            InstallEvent::Failed { failure, .. } => self.show_failure(&failure),
            // Already handled earlier in the request, nothing to say
            InstallEvent::AlreadyAttempted { .. }
            | InstallEvent::BatchStarted { .. }
            | InstallEvent::BatchCompleted { .. } => {}
        }
    }

    fn show_header(&self, title: &str) {
        if self.colors_enabled {
            println!("{} {}", style("==>").blue().bold(), style(title).bold());
        } else {
            println!("==> {title}");
        }
    }

    fn show_warning(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{} {message}", style("Warning:").yellow().bold());
        } else {
            eprintln!("Warning: {message}");
        }
    }

    fn show_error(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{} {message}", style("Error:").red().bold());
        } else {
            eprintln!("Error: {message}");
        }
    }

    fn show_failure(&self, failure: &FailureContext) {
        self.show_warning(&failure.message);
        if let Some(hint) = &failure.hint {
            eprintln!("  Hint: {hint}");
        }
    }

    fn success(&self, message: &str) -> String {
        if self.colors_enabled {
            style(message).green().to_string()
        } else {
            message.to_string()
        }
    }

    fn dim(&self, message: &str) -> String {
        if self.colors_enabled {
            style(message).dim().to_string()
        } else {
            message.to_string()
        }
    }
}
