//! Operations context for dependency injection

use keg_config::Config;
use keg_errors::{Error, OpsError};
use keg_events::{EventEmitter, EventSender};
use keg_install::{Blacklist, InstallerFactory, NameResolver};
use keg_platform::EnvironmentProbe;
use std::sync::Arc;

/// Operations context providing access to all collaborators
pub struct OpsCtx {
    /// System configuration
    pub config: Config,
    /// Host checks used by preflight and the privilege check
    pub probe: Arc<dyn EnvironmentProbe>,
    /// Formula lookup
    pub resolver: Arc<dyn NameResolver>,
    pub blacklist: Arc<dyn Blacklist>,
    /// Opens one installer session per request
    pub installers: Arc<dyn InstallerFactory>,
    /// Event sender for progress reporting
    pub tx: EventSender,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for [`OpsCtx`]
pub struct OpsContextBuilder {
    config: Option<Config>,
    probe: Option<Arc<dyn EnvironmentProbe>>,
    resolver: Option<Arc<dyn NameResolver>>,
    blacklist: Option<Arc<dyn Blacklist>>,
    installers: Option<Arc<dyn InstallerFactory>>,
    tx: Option<EventSender>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            probe: None,
            resolver: None,
            blacklist: None,
            installers: None,
            tx: None,
        }
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set environment probe
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn EnvironmentProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Set formula resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn NameResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set blacklist
    #[must_use]
    pub fn with_blacklist(mut self, blacklist: Arc<dyn Blacklist>) -> Self {
        self.blacklist = Some(blacklist);
        self
    }

    /// Set installer factory
    #[must_use]
    pub fn with_installers(mut self, installers: Arc<dyn InstallerFactory>) -> Self {
        self.installers = Some(installers);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let probe = self.probe.ok_or_else(|| missing("probe"))?;
        let resolver = self.resolver.ok_or_else(|| missing("resolver"))?;
        let blacklist = self.blacklist.ok_or_else(|| missing("blacklist"))?;
        let installers = self.installers.ok_or_else(|| missing("installers"))?;
        let tx = self.tx.ok_or_else(|| missing("event_sender"))?;
        let config = self.config.ok_or_else(|| missing("config"))?;

        Ok(OpsCtx {
            config,
            probe,
            resolver,
            blacklist,
            installers,
            tx,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(component: &str) -> OpsError {
    OpsError::MissingComponent {
        component: component.to_string(),
    }
}
