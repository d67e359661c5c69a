//! Minimum-version table, vendor resolution, and runtime properties.
//!
//! A [`VersionTable`] maps a platform specification version (e.g. `"21"`) to
//! the minimum JVMCI version required for each VM vendor. Every row carries a
//! mandatory default entry; vendors without a specific entry fall back to it.
//! Callers build and inject the table (there is no hidden global), either in
//! code, from a JSON file, or via [`VersionTable::builtin`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CheckError, Result};
use crate::version::Version;

/// Wire-format key marking the default-vendor entry in a JSON table row.
pub const DEFAULT_VENDOR_KEY: &str = "*";

/// The version-relevant properties reported by the running VM.
///
/// Opaque caller-supplied input; `vendor: None` selects the default
/// vendor entry.
#[derive(Debug, Clone)]
pub struct RuntimeProperties {
    /// `java.specification.version`, e.g. `"21"`.
    pub spec_version: String,
    /// `java.vm.version`, the full VM version string.
    pub vm_version: String,
    /// `java.vm.vendor`, if known.
    pub vendor: Option<String>,
}

impl RuntimeProperties {
    pub fn new(
        spec_version: impl Into<String>,
        vm_version: impl Into<String>,
        vendor: Option<String>,
    ) -> Self {
        Self {
            spec_version: spec_version.into(),
            vm_version: vm_version.into(),
            vendor,
        }
    }
}

/// Per-vendor minimum versions for one specification version.
///
/// The default entry is a required field rather than a magic map key, so
/// "every row has a default" holds by construction.
#[derive(Debug, Clone)]
pub struct VendorEntries {
    default: Version,
    vendors: HashMap<String, Version>,
}

impl VendorEntries {
    /// A row with only a default-vendor minimum.
    pub fn new(default: Version) -> Self {
        Self {
            default,
            vendors: HashMap::new(),
        }
    }

    /// Add a vendor-specific minimum.
    pub fn with_vendor(mut self, vendor: impl Into<String>, version: Version) -> Self {
        self.vendors.insert(vendor.into(), version);
        self
    }

    /// The minimum for `vendor`, falling back to the default entry.
    pub fn for_vendor(&self, vendor: Option<&str>) -> &Version {
        vendor
            .and_then(|v| self.vendors.get(v))
            .unwrap_or(&self.default)
    }
}

/// JSON wire format: spec version → vendor key → rendered version string.
#[derive(Debug, Deserialize)]
struct RawTable(HashMap<String, HashMap<String, String>>);

/// Minimum required JVMCI versions, keyed by specification version.
#[derive(Debug, Clone, Default)]
pub struct VersionTable {
    rows: HashMap<String, VendorEntries>,
}

impl VersionTable {
    /// An empty table (no constraints; every check passes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the row for a specification version.
    pub fn insert(&mut self, spec_version: impl Into<String>, entries: VendorEntries) {
        self.rows.insert(spec_version.into(), entries);
    }

    /// Resolve the minimum version for the given runtime.
    ///
    /// `None` means the table has no row for the spec version, i.e. no
    /// constraint is enforced. An unrecognized vendor falls back to the
    /// row's default entry.
    pub fn min_version(&self, props: &RuntimeProperties) -> Option<&Version> {
        self.rows
            .get(&props.spec_version)
            .map(|row| row.for_vendor(props.vendor.as_deref()))
    }

    /// Load a table from its JSON wire format:
    ///
    /// ```json
    /// { "21": { "*": "23.1-b33", "Oracle Corporation": "23.1-b35" } }
    /// ```
    ///
    /// Version values are rendered forms re-parsed by [`Version::parse`].
    /// A row without a `"*"` default entry is rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json).map_err(|e| CheckError::InvalidTable {
            message: e.to_string(),
        })?;

        let mut table = Self::new();
        for (spec_version, row) in raw.0 {
            let mut default = None;
            let mut vendors = HashMap::new();
            for (vendor, rendered) in row {
                let version: Version =
                    rendered.parse().map_err(|e| CheckError::InvalidTable {
                        message: format!("row `{spec_version}`, vendor `{vendor}`: {e}"),
                    })?;
                if vendor == DEFAULT_VENDOR_KEY {
                    default = Some(version);
                } else {
                    vendors.insert(vendor, version);
                }
            }
            let Some(default) = default else {
                return Err(CheckError::InvalidTable {
                    message: format!(
                        "row `{spec_version}` has no `{DEFAULT_VENDOR_KEY}` default entry"
                    ),
                });
            };
            table.insert(spec_version, VendorEntries { default, vendors });
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The minimum versions this build of the tool was compiled against.
    ///
    /// Used by the CLI when no table file is supplied.
    pub fn builtin() -> Self {
        fn jdk(base: &str, jvmci_build: u64) -> Version {
            Version::jdk(
                base.parse().expect("built-in base versions must parse"),
                jvmci_build,
            )
        }

        let mut table = Self::new();
        table.insert("17", VendorEntries::new(Version::legacy(23, 0, 5)));
        table.insert(
            "21",
            VendorEntries::new(jdk("23.1", 33)).with_vendor("Oracle Corporation", jdk("23.1", 35)),
        );
        table.insert("22", VendorEntries::new(jdk("22.0.1", 3)));
        table.insert("23", VendorEntries::new(jdk("23+22", 1)));
        table
    }
}
