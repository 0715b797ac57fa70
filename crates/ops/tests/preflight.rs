//! Tests for the environment gate

mod common;

use common::{CallLog, FakeProbe};
use keg_errors::PreflightError;
use keg_ops::{PreflightCheckResult, PreflightValidator};
use keg_types::{CpuArch, PreflightCheck};

const PREFIX: &str = "/opt/keg";
const CELLAR: &str = "/opt/keg/Cellar";

fn checks(results: &[PreflightCheckResult]) -> Vec<PreflightCheck> {
    results.iter().map(PreflightCheckResult::check).collect()
}

#[test]
fn clean_host_passes_every_check_in_order() {
    let probe = FakeProbe::new(CallLog::default()).with_existing(CELLAR);

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    assert_eq!(checks(&results), PreflightCheck::ORDER.to_vec());
    assert!(results
        .iter()
        .all(|r| matches!(r, PreflightCheckResult::Pass { .. })));
}

#[test]
fn unsupported_architecture_short_circuits() {
    let log = CallLog::default();
    let mut probe = FakeProbe::new(log.clone());
    probe.arch = CpuArch::Unknown("sparc".to_string());

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    assert_eq!(results.len(), 1);
    match &results[0] {
        PreflightCheckResult::Fatal {
            error: PreflightError::UnsupportedArchitecture { arch, support_url },
            ..
        } => {
            assert!(arch.contains("sparc"));
            assert!(support_url.starts_with("https://"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!log.contains_prefix("probe:toolchain"));
    assert!(!log.contains_prefix("probe:mkdir"));
}

#[test]
fn unwritable_existing_cellar_is_fatal() {
    let log = CallLog::default();
    let probe = FakeProbe::new(log.clone())
        .with_existing(CELLAR)
        .with_unwritable(CELLAR);

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    let last = results.last().unwrap();
    assert_eq!(last.check(), PreflightCheck::WritableLocation);
    assert!(matches!(
        last,
        PreflightCheckResult::Fatal {
            error: PreflightError::NotWritable { path },
            ..
        } if path == CELLAR
    ));
    assert!(!log.contains_prefix("probe:toolchain"));
}

#[test]
fn unwritable_prefix_is_fatal() {
    let probe = FakeProbe::new(CallLog::default()).with_unwritable(PREFIX);

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    assert!(results.last().unwrap().is_fatal());
    assert_eq!(results.len(), 2);
}

#[test]
fn unwritable_default_prefix_is_tolerated() {
    let probe = FakeProbe::new(CallLog::default())
        .with_unwritable("/usr/local")
        .with_existing("/usr/local/Cellar");

    let results = PreflightValidator::new(&probe, "/usr/local", "/usr/local/Cellar").validate();

    assert!(!results.iter().any(PreflightCheckResult::is_fatal));
}

#[test]
fn toolchain_advisories_are_warnings() {
    let mut probe = FakeProbe::new(CallLog::default()).with_existing(CELLAR);
    probe.toolchain = Some("A newer compiler toolchain is available.".to_string());
    probe.license = Some("You have not agreed to the toolchain license.".to_string());

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    let warnings: Vec<_> = results
        .iter()
        .filter_map(PreflightCheckResult::warning)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert_eq!(results.last().unwrap().check(), PreflightCheck::Cellar);
}

#[test]
fn empty_advisory_is_not_a_warning() {
    let mut probe = FakeProbe::new(CallLog::default()).with_existing(CELLAR);
    probe.toolchain = Some("  ".to_string());

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    assert!(results.iter().all(|r| r.warning().is_none()));
}

#[test]
fn competing_managers_warn_but_never_block() {
    let mut probe = FakeProbe::new(CallLog::default()).with_existing(CELLAR);
    probe.managers = vec!["MacPorts".to_string(), "Fink".to_string()];

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    let warning = results
        .iter()
        .find(|r| r.check() == PreflightCheck::CompetingManagers)
        .and_then(PreflightCheckResult::warning)
        .unwrap();
    assert!(warning.contains("MacPorts or Fink"));
    assert!(!results.iter().any(PreflightCheckResult::is_fatal));
}

#[test]
fn missing_cellar_is_created_once() {
    let log = CallLog::default();
    let probe = FakeProbe::new(log.clone());
    let validator = PreflightValidator::new(&probe, PREFIX, CELLAR);

    assert!(!validator.validate().iter().any(PreflightCheckResult::is_fatal));
    assert!(!validator.validate().iter().any(PreflightCheckResult::is_fatal));

    assert_eq!(log.count("probe:mkdir"), 1);
}

#[test]
fn cellar_creation_failure_names_parent() {
    let mut probe = FakeProbe::new(CallLog::default());
    probe.create_fails = true;

    let results = PreflightValidator::new(&probe, PREFIX, CELLAR).validate();

    match results.last().unwrap() {
        PreflightCheckResult::Fatal { check, error } => {
            assert_eq!(*check, PreflightCheck::Cellar);
            let message = error.to_string();
            assert!(message.contains("Could not create /opt/keg/Cellar"));
            assert!(message.contains("permission to write to /opt/keg"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
