//! CLI argument definitions and dispatch.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;

use clap::Parser;

use crate::check::{self, FailureMode};
use crate::error::Result;
use crate::table::{RuntimeProperties, VersionTable};

/// jvmci-check - JVMCI version compatibility checker.
#[derive(Debug, Parser)]
#[command(name = "jvmci-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Platform specification version (java.specification.version)
    #[arg(short, long, env = "JAVA_SPECIFICATION_VERSION")]
    pub spec_version: String,

    /// Full VM version string (java.vm.version)
    #[arg(short = 'm', long, env = "JAVA_VM_VERSION")]
    pub vm_version: String,

    /// VM vendor (java.vm.vendor); omit to use the default vendor entry
    #[arg(long, env = "JAVA_VM_VENDOR")]
    pub vendor: Option<String>,

    /// Path to a JSON minimum-version table (default: built-in table)
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Write the detected version components to this file on success
    #[arg(long)]
    pub version_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Run the check described by the parsed arguments.
///
/// A non-suppressed version mismatch terminates the process via
/// [`FailureMode::Exit`]; parse errors and bad table files are returned
/// for the caller to report.
pub fn run(cli: &Cli) -> Result<()> {
    let table = match &cli.table {
        Some(path) => VersionTable::from_json_file(path)?,
        None => VersionTable::builtin(),
    };

    let props = RuntimeProperties::new(
        cli.spec_version.clone(),
        cli.vm_version.clone(),
        cli.vendor.clone(),
    );

    let checked = check::check(&props, &table, FailureMode::Exit)?;

    if let (Some(path), Some(version)) = (&cli.version_file, &checked) {
        check::write_version_file(path, version)?;
        tracing::debug!("wrote detected JVMCI version {version} to {}", path.display());
    }

    Ok(())
}
