//! Install command implementation
//!
//! Validates the request, gates on the environment once, then installs
//! each resolved formula in request order.

use crate::{InstallExecutor, OpsCtx, PreflightValidator};
use keg_errors::{Error, OpsError, UserFacingError};
use keg_events::{AppEvent, EventEmitter, FailureContext, InstallEvent, PreflightEvent};
use keg_types::{
    InstallReport, InstallRequest, PackageDescriptor, PreflightCheck, PreflightCheckResult,
};
use std::time::Instant;
use uuid::Uuid;

/// Install the formulae named in `request`
///
/// Per-formula failures are recorded in the report and do not stop the
/// remaining formulae.
///
/// # Errors
///
/// Returns an error if:
/// - No formulae are specified, or `--head` was spelled in lowercase
/// - A blacklisted formula is requested without `force`
/// - keg runs as root from an executable root does not own
/// - A name cannot be resolved
/// - A preflight check fails
/// - An installer fails in a way that is not classified as recoverable
pub fn install(ctx: &OpsCtx, request: &InstallRequest) -> Result<InstallReport, Error> {
    let start = Instant::now();

    validate_request(ctx, request)?;

    let packages = request
        .names
        .iter()
        .map(|name| ctx.resolver.resolve(name))
        .collect::<Result<Vec<PackageDescriptor>, Error>>()?;

    let mut report = InstallReport::default();
    if packages.is_empty() {
        return Ok(report);
    }

    ctx.emit_operation_started("install");
    report.warnings = run_preflight(ctx)?;

    let operation_id = Uuid::new_v4();
    ctx.emit(AppEvent::Install(InstallEvent::BatchStarted {
        operation_id,
        packages: packages.iter().map(|pkg| pkg.name.clone()).collect(),
    }));

    let executor = InstallExecutor::new(ctx.installers.begin(request), ctx.tx.clone());
    for package in &packages {
        let outcome = match executor.execute(package) {
            Ok(outcome) => outcome,
            Err(err) => {
                ctx.emit_operation_failed("install", err.user_message());
                return Err(err);
            }
        };
        report.record(&package.name, outcome);
    }

    report.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    ctx.emit(AppEvent::Install(InstallEvent::BatchCompleted {
        operation_id,
        installed: report.installed.len(),
        failed: report.failed.len(),
        duration_ms: report.duration_ms,
    }));
    ctx.emit_operation_completed("install", !report.has_failures());

    Ok(report)
}

/// Request-level checks that must pass before anything touches the host
fn validate_request(ctx: &OpsCtx, request: &InstallRequest) -> Result<(), Error> {
    if request.is_empty() {
        return Err(OpsError::NoTargetsSpecified.into());
    }

    if request.lowercase_head {
        return Err(OpsError::InvalidHeadSpelling.into());
    }

    if !request.force {
        for name in &request.names {
            // Formulae defined in the local repository are never blacklisted
            if ctx.resolver.is_locally_defined(name) {
                continue;
            }
            if let Some(advisory) = ctx.blacklist.lookup(name) {
                return Err(OpsError::PackageUnavailable {
                    name: name.clone(),
                    advisory,
                }
                .into());
            }
        }
    }

    if ctx.probe.is_superuser() {
        let executable = ctx.config.installer_executable();
        if !ctx.probe.owner_is_superuser(&executable)? {
            return Err(OpsError::UnsafeElevatedInstall {
                executable: executable.display().to_string(),
            }
            .into());
        }
    }

    Ok(())
}

/// Run the environment gate and return its warnings
fn run_preflight(ctx: &OpsCtx) -> Result<Vec<String>, Error> {
    ctx.emit(AppEvent::Preflight(PreflightEvent::Started {
        checks: PreflightCheck::ORDER.to_vec(),
    }));

    let validator =
        PreflightValidator::new(ctx.probe.as_ref(), ctx.config.prefix(), ctx.config.cellar());

    let mut warnings = Vec::new();
    for result in validator.validate() {
        match result {
            PreflightCheckResult::Pass { check } => {
                ctx.emit(AppEvent::Preflight(PreflightEvent::CheckPassed { check }));
            }
            PreflightCheckResult::Warn { check, message } => {
                ctx.emit(AppEvent::Preflight(PreflightEvent::CheckWarned {
                    check,
                    message: message.clone(),
                }));
                warnings.push(message);
            }
            PreflightCheckResult::Fatal { check, error } => {
                ctx.emit(AppEvent::Preflight(PreflightEvent::CheckFailed {
                    check,
                    failure: FailureContext::from_error(&error),
                }));
                return Err(error.into());
            }
        }
    }

    ctx.emit(AppEvent::Preflight(PreflightEvent::Completed {
        warnings: warnings.len(),
    }));
    Ok(warnings)
}
