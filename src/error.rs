//! Error types for version-check operations.
//!
//! This module defines [`CheckError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CheckError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CheckError::Other`) for unexpected errors
//! - Parse failures always carry the fixed `Cannot read JVMCI version from
//!   java.vm.version property` prefix so outer harnesses can match on it

use thiserror::Error;

use crate::version::Version;

/// Core error type for version-check operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The `java.vm.version` string matches neither the legacy nor the new
    /// JVMCI version syntax, or a numeric segment is out of range.
    #[error("Cannot read JVMCI version from java.vm.version property: {vm_version}: {reason}")]
    Parse { vm_version: String, reason: String },

    /// The running VM reports a JVMCI version below the required minimum.
    #[error(
        "The Java VM version {actual} is below the minimum JVMCI version {required} \
         required for JDK {spec_version} (vendor entry: {vendor}). \
         Set the JVMCI_VERSION_CHECK environment variable to \"warn\" or \"ignore\" \
         to suppress this failure."
    )]
    IncompatibleVersion {
        spec_version: String,
        vendor: String,
        actual: Version,
        required: Version,
    },

    /// Malformed minimum-version table.
    #[error("Invalid version table: {message}")]
    InvalidTable { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for version-check operations.
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_fixed_prefix() {
        let err = CheckError::Parse {
            vm_version: "garbage".into(),
            reason: "no recognizable segment".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot read JVMCI version from java.vm.version property"));
        assert!(msg.contains("garbage"));
        assert!(msg.contains("no recognizable segment"));
    }

    #[test]
    fn incompatible_version_names_all_parties() {
        let err = CheckError::IncompatibleVersion {
            spec_version: "21".into(),
            vendor: "Oracle Corporation".into(),
            actual: Version::legacy(20, 0, 1),
            required: Version::legacy(23, 1, 33),
        };
        let msg = err.to_string();
        assert!(msg.contains("21"));
        assert!(msg.contains("Oracle Corporation"));
        assert!(msg.contains("20.0-b01"));
        assert!(msg.contains("23.1-b33"));
        assert!(msg.contains("JVMCI_VERSION_CHECK"));
    }

    #[test]
    fn invalid_table_displays_message() {
        let err = CheckError::InvalidTable {
            message: "row `99` has no default entry".into(),
        };
        assert!(err.to_string().contains("row `99` has no default entry"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CheckError = io_err.into();
        assert!(matches!(err, CheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CheckError::InvalidTable {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
