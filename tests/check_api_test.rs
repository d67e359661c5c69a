//! Library-level integration tests covering the public check API:
//! parsing at 64-bit extremes, vendor resolution rendering, and the
//! override policy, exercised together the way an embedder would.

use jvmci_check::check::{check_with_override, FailureMode, VersionCheckOverride};
use jvmci_check::table::{RuntimeProperties, VendorEntries, VersionTable};
use jvmci_check::version::Version;
use jvmci_check::CheckError;

const MAX: u64 = i64::MAX as u64;

fn jdk(base: &str, build: u64) -> Version {
    Version::jdk(base.parse().unwrap(), build)
}

/// The table shape used throughout: spec version "99" isolates the tests
/// from any real runtime's own spec version.
fn vendor_table() -> VersionTable {
    let mut table = VersionTable::new();
    table.insert(
        "99",
        VendorEntries::new(jdk("99+99", 1)).with_vendor("Vendor Specific", jdk("99.0.1", 1)),
    );
    table
}

#[test]
fn default_vendor_resolves_and_renders() {
    let table = vendor_table();
    let props = RuntimeProperties::new("99", "irrelevant", Some("Vendor Default".into()));
    assert_eq!(
        table.min_version(&props).unwrap().to_string(),
        "99+99-jvmci-b01"
    );
}

#[test]
fn specific_vendor_resolves_and_renders() {
    let table = vendor_table();
    let props = RuntimeProperties::new("99", "irrelevant", Some("Vendor Specific".into()));
    assert_eq!(
        table.min_version(&props).unwrap().to_string(),
        "99.0.1-jvmci-b01"
    );
}

#[test]
fn legacy_strings_with_max_components_survive_the_full_check() {
    // Each huge component must either parse preserving its magnitude or
    // fail with the fixed message; with 64-bit components they all parse.
    let table = vendor_table();
    for vm in [
        format!("20.0-b{MAX}"),
        format!("20.{MAX}-b1"),
        format!("{MAX}.0-b1"),
    ] {
        let props = RuntimeProperties::new("99", &vm, None);
        // Legacy versions sort below the new-form minimum, so this is a
        // mismatch; the point is that it is a *mismatch*, not a parse error.
        let err = check_with_override(
            &props,
            &table,
            FailureMode::Raise,
            VersionCheckOverride::Strict,
        )
        .unwrap_err();
        assert!(
            matches!(err, CheckError::IncompatibleVersion { .. }),
            "expected version mismatch for {vm}, got {err}"
        );
    }
}

#[test]
fn new_form_jvmci_build_at_max_round_trips() {
    let vm = format!("99.0.1-jvmci-b{MAX}");
    let parsed = Version::parse(&vm).unwrap();
    assert_eq!(parsed.jvmci_build(), MAX);
    assert_eq!(Version::parse(&parsed.to_string()).unwrap(), parsed);
}

#[test]
fn mismatch_is_raised_then_suppressed_by_each_override() {
    let table = vendor_table();
    let props = RuntimeProperties::new("99", "99+99-jvmci-b00", None);

    let strict = check_with_override(
        &props,
        &table,
        FailureMode::Raise,
        VersionCheckOverride::Strict,
    );
    assert!(matches!(
        strict,
        Err(CheckError::IncompatibleVersion { .. })
    ));

    for policy in [VersionCheckOverride::Warn, VersionCheckOverride::Ignore] {
        let checked = check_with_override(&props, &table, FailureMode::Raise, policy).unwrap();
        assert_eq!(checked.unwrap().jvmci_build(), 0);
    }
}

#[test]
fn satisfied_runtime_passes_strict_check() {
    let table = vendor_table();
    let props = RuntimeProperties::new("99", "99+99-jvmci-b02", None);
    let checked = check_with_override(
        &props,
        &table,
        FailureMode::Raise,
        VersionCheckOverride::Strict,
    )
    .unwrap();
    assert_eq!(checked.unwrap().to_string(), "99+99-jvmci-b02");
}

#[test]
fn absent_spec_version_passes_any_runtime() {
    let table = vendor_table();
    for vm in ["garbage", "20.0-b01", "99+99-jvmci-b99"] {
        let props = RuntimeProperties::new("17", vm, None);
        let checked = check_with_override(
            &props,
            &table,
            FailureMode::Raise,
            VersionCheckOverride::Strict,
        )
        .unwrap();
        assert!(checked.is_none());
    }
}

#[test]
fn json_table_and_code_built_table_agree() {
    let from_json = VersionTable::from_json_str(
        r#"{ "99": { "*": "99+99-jvmci-b01", "Vendor Specific": "99.0.1-jvmci-b01" } }"#,
    )
    .unwrap();
    let built = vendor_table();

    for vendor in [None, Some("Vendor Specific".to_string()), Some("Other".to_string())] {
        let props = RuntimeProperties::new("99", "irrelevant", vendor);
        assert_eq!(
            from_json.min_version(&props).unwrap(),
            built.min_version(&props).unwrap()
        );
    }
}
