//! Wiring of the production collaborators

use crate::error::CliError;
use keg_config::Config;
use keg_events::EventSender;
use keg_install::{Blacklist, BuiltinBlacklist, FormulaRepository, KegInstallerFactory, KegLayout};
use keg_ops::{OpsContextBuilder, OpsCtx};
use keg_platform::HostProbe;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the operations context from configuration
pub struct SystemSetup {
    config: Config,
}

impl SystemSetup {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build operations context with all required components
    pub fn build_context(&self, event_sender: EventSender) -> Result<OpsCtx, CliError> {
        info!("Initializing keg components");

        let blacklist: Arc<dyn Blacklist> =
            Arc::new(BuiltinBlacklist::from_config(&self.config.blacklist));
        let formula_dir = self.config.formula_dir();
        debug!(formula_dir = %formula_dir.display(), "Using formula repository");
        let repository = Arc::new(FormulaRepository::new(formula_dir, Arc::clone(&blacklist)));

        let layout = KegLayout::from_config(&self.config);
        debug!(
            cellar = %layout.cellar.display(),
            prefix = %layout.prefix.display(),
            "Using keg layout"
        );
        let installers = KegInstallerFactory::new(layout, repository.clone())
            .with_event_sender(event_sender.clone());

        let ctx = OpsContextBuilder::new()
            .with_config(self.config.clone())
            .with_probe(Arc::new(HostProbe::new()))
            .with_resolver(repository)
            .with_blacklist(blacklist)
            .with_installers(Arc::new(installers))
            .with_event_sender(event_sender)
            .build()?;

        Ok(ctx)
    }
}
