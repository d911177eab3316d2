use depreport_util::errors::ReportError;
use std::path::PathBuf;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = ReportError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_snapshot_error_display() {
    let err = ReportError::Snapshot {
        message: "expected value at line 1".to_string(),
    };
    assert_eq!(err.to_string(), "Snapshot error: expected value at line 1");
}

#[test]
fn test_config_error_display() {
    let err = ReportError::Config {
        message: "bad glob".to_string(),
    };
    assert_eq!(err.to_string(), "Configuration error: bad glob");
}

#[test]
fn test_output_write_error_names_path() {
    let err = ReportError::OutputWrite {
        path: PathBuf::from("/ro/report.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "Failed to write report to /ro/report.json: denied");
}

#[test]
fn test_generic_error_display() {
    let err = ReportError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}
