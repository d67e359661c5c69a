//! Version check policy: comparison, overrides, and failure modes.
//!
//! The check resolves the minimum required version for the running VM,
//! parses the current version out of `java.vm.version`, and compares the
//! two. A failing comparison is then, and only then, gated by the
//! `JVMCI_VERSION_CHECK` environment variable: `ignore` passes silently,
//! `warn` logs and passes, anything else enforces the minimum. Enforcement
//! either returns an error or, in [`FailureMode::Exit`], prints the
//! diagnostic to stderr and terminates the process with a non-zero status.

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use crate::error::{CheckError, Result};
use crate::table::{RuntimeProperties, VersionTable};
use crate::version::Version;

/// Environment variable consulted when a version mismatch is detected.
pub const OVERRIDE_ENV_VAR: &str = "JVMCI_VERSION_CHECK";

/// How a detected version mismatch is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheckOverride {
    /// Enforce the minimum (the default).
    Strict,
    /// Log a warning but pass.
    Warn,
    /// Pass silently.
    Ignore,
}

impl VersionCheckOverride {
    /// Read the override from [`OVERRIDE_ENV_VAR`].
    pub fn from_env() -> Self {
        Self::from_value(env::var(OVERRIDE_ENV_VAR).ok().as_deref())
    }

    /// `ignore` and `warn` are recognized; anything else, including unset,
    /// means strict enforcement.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("ignore") => Self::Ignore,
            Some("warn") => Self::Warn,
            _ => Self::Strict,
        }
    }
}

/// How a non-suppressed failure is signaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Return the mismatch as [`CheckError::IncompatibleVersion`].
    Raise,
    /// Print a diagnostic to stderr and terminate the process with a
    /// non-zero status. Intended for startup/CLI use; callers testing this
    /// branch must run the check in a subprocess.
    Exit,
}

/// Check the running VM against the table, reading the override from the
/// environment.
///
/// On success returns the parsed current version when one was extracted;
/// `None` means the table had no row for the spec version, which passes
/// without parsing `java.vm.version` at all.
pub fn check(
    props: &RuntimeProperties,
    table: &VersionTable,
    mode: FailureMode,
) -> Result<Option<Version>> {
    check_with_override(props, table, mode, VersionCheckOverride::from_env())
}

/// [`check`] with an explicit override instead of the process environment.
pub fn check_with_override(
    props: &RuntimeProperties,
    table: &VersionTable,
    mode: FailureMode,
    policy: VersionCheckOverride,
) -> Result<Option<Version>> {
    let Some(min) = table.min_version(props) else {
        tracing::debug!(
            "no minimum JVMCI version for JDK {}; nothing to enforce",
            props.spec_version
        );
        return Ok(None);
    };

    // Parse failures are never suppressed by the override.
    let current = Version::parse(&props.vm_version)?;

    if current < *min {
        // The override is consulted only once a failing comparison exists.
        match policy {
            VersionCheckOverride::Ignore => {}
            VersionCheckOverride::Warn => {
                tracing::warn!(
                    "JVMCI version {current} is below the minimum {min} required for JDK {} \
                     (vendor: {}); continuing because {OVERRIDE_ENV_VAR}=warn",
                    props.spec_version,
                    vendor_label(props),
                );
            }
            VersionCheckOverride::Strict => {
                let err = CheckError::IncompatibleVersion {
                    spec_version: props.spec_version.clone(),
                    vendor: vendor_label(props),
                    actual: current,
                    required: min.clone(),
                };
                match mode {
                    FailureMode::Raise => return Err(err),
                    FailureMode::Exit => {
                        eprintln!("{err}");
                        process::exit(1);
                    }
                }
            }
        }
    }

    Ok(Some(current))
}

/// Write the detected version's numeric components as a comma-separated
/// line, the format the outer build harness reads back.
pub fn write_version_file(path: &Path, version: &Version) -> Result<()> {
    let line = version
        .components()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    fs::write(path, line)?;
    Ok(())
}

fn vendor_label(props: &RuntimeProperties) -> String {
    props
        .vendor
        .clone()
        .unwrap_or_else(|| "default".to_string())
}
