//! jvmci-check - JVMCI version compatibility checking.
//!
//! Parses the version identifier a JVMCI-enabled runtime reports in its
//! `java.vm.version` property, resolves the minimum JVMCI version required
//! for the platform specification version and VM vendor from a
//! caller-supplied table, and decides accept / warn / fail. The hard-failure
//! path either returns an error (library mode) or prints a diagnostic and
//! terminates the process with a non-zero status (startup/CLI mode).
//!
//! # Modules
//!
//! - [`check`] - Check policy: comparison, environment override, failure modes
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`table`] - Minimum-version table, vendor resolution, runtime properties
//! - [`version`] - Version model and version-string parsing
//!
//! # Example
//!
//! ```
//! use jvmci_check::check::{check_with_override, FailureMode, VersionCheckOverride};
//! use jvmci_check::table::{RuntimeProperties, VendorEntries, VersionTable};
//! use jvmci_check::version::Version;
//!
//! let mut table = VersionTable::new();
//! table.insert("99", VendorEntries::new(Version::legacy(20, 0, 1)));
//!
//! let props = RuntimeProperties::new("99", "20.0-b03", None);
//! let checked = check_with_override(
//!     &props,
//!     &table,
//!     FailureMode::Raise,
//!     VersionCheckOverride::Strict,
//! );
//! assert!(checked.is_ok());
//! ```

pub mod check;
pub mod cli;
pub mod error;
pub mod table;
pub mod version;

pub use error::{CheckError, Result};
