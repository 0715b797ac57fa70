//! Integration tests for error types

#[cfg(test)]
mod tests {
    use keg_errors::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = OpsError::NoTargetsSpecified.into();
        assert!(matches!(err, Error::Ops(OpsError::NoTargetsSpecified)));
    }

    #[test]
    fn test_head_spelling_message() {
        let err = OpsError::InvalidHeadSpelling;
        assert_eq!(
            err.to_string(),
            "Specify `--HEAD` in uppercase to build from trunk."
        );
    }

    #[test]
    fn test_unavailable_carries_advisory() {
        let err = OpsError::PackageUnavailable {
            name: "pip".into(),
            advisory: "Install pip with easy_install.".into(),
        };
        assert_eq!(
            err.to_string(),
            "No available formula for pip\nInstall pip with easy_install."
        );

        let bare = FormulaError::Unavailable {
            name: "nope".into(),
            advisory: None,
        };
        assert_eq!(bare.to_string(), "No available formula for nope");
    }

    #[test]
    fn test_install_classification() {
        let attempted = InstallError::AlreadyAttempted {
            package: "openssl".into(),
        };
        assert_eq!(attempted.class(), InstallFailureClass::AlreadyAttempted);

        let cannot = InstallError::cannot_install("wget", "wget requires openssl");
        assert_eq!(cannot.class(), InstallFailureClass::CannotInstall);
        assert_eq!(cannot.package(), "wget");

        let dep = InstallError::UnsatisfiedDependency {
            package: "wget".into(),
            dependency: "openssl".into(),
            message: "no formula".into(),
        };
        assert_eq!(dep.class(), InstallFailureClass::CannotInstall);

        let unknown = InstallError::Unclassified {
            package: "wget".into(),
            message: "boom".into(),
        };
        assert_eq!(unknown.class(), InstallFailureClass::Unclassified);
    }

    #[test]
    fn test_non_install_errors_are_unclassified() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert_eq!(err.install_class(), InstallFailureClass::Unclassified);

        let err: Error = InstallError::cannot_install("jq", "broken").into();
        assert_eq!(err.install_class(), InstallFailureClass::CannotInstall);
    }

    #[test]
    fn test_cellar_failure_names_parent() {
        let err = PreflightError::CellarCreationFailed {
            path: "/usr/local/Cellar".into(),
            parent: "/usr/local".into(),
            message: "Permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not create /usr/local/Cellar\nCheck you have permission to write to /usr/local"
        );
    }

    #[test]
    fn test_user_facing_codes() {
        let err: Error = OpsError::UnsafeElevatedInstall {
            executable: "/usr/local/bin/keg".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("ops.unsafe_elevated_install"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_clone() {
        let err = PreflightError::NotWritable {
            path: "/usr/local".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(&io, "/tmp/keg");
        match err {
            Error::Io { path, message, .. } => {
                assert_eq!(path.as_deref(), Some(std::path::Path::new("/tmp/keg")));
                assert!(message.starts_with("/tmp/keg"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
