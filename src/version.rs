//! JVMCI version model and version-string parsing.
//!
//! A JVMCI-enabled runtime reports its version inside the `java.vm.version`
//! property using one of two historical syntaxes:
//!
//! - **Legacy**: a `<major>.<minor>-b<build>` segment, e.g. `20.0-b05`.
//! - **New**: a JDK `Runtime.Version`-style base followed by a JVMCI build
//!   suffix, e.g. `21.0.2+13-jvmci-b01` or `99+99-jvmci-b01`.
//!
//! The presence of `-jvmci-b` selects the new syntax; otherwise the string
//! must contain a legacy segment. All numeric components are read as full
//! 64-bit values, so components as large as `i64::MAX` survive a round trip.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CheckError, Result};

/// Marker that selects the new version syntax.
const JVMCI_BUILD_MARKER: &str = "-jvmci-b";

/// New syntax: base runtime version, then the JVMCI build number.
/// Trailing text after the build digits is tolerated.
static NEW_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>.+)-jvmci-b(?P<build>\d+)").expect("NEW_FORM regex must compile")
});

/// Legacy syntax: a `<major>.<minor>-b<build>` segment anywhere in the string.
static LEGACY_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<major>\d+)\.(?P<minor>\d+)-b(?P<build>\d+)")
        .expect("LEGACY_FORM regex must compile")
});

/// Shape of a base runtime version: dot-separated numerics, an optional
/// pre-release tag, an optional `+<build>`, and an optional trailing tag.
static BASE_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<nums>\d+(?:\.\d+)*)(?:-(?P<pre>[a-zA-Z0-9]+))?(?:\+(?P<build>\d+))?(?:-(?P<opt>[-A-Za-z0-9.]+))?$",
    )
    .expect("BASE_FORM regex must compile")
});

/// A JDK `Runtime.Version`-style base version, e.g. `99+99` or `21.0.2+13-LTS`.
///
/// Ordering compares the numeric components lexicographically (missing
/// trailing components count as zero), then the pre-release tag (a
/// pre-release sorts below the corresponding release), then the build
/// number (absent sorts below present). The trailing opt tag is ignored
/// for both ordering and equality.
#[derive(Debug, Clone)]
pub struct JdkVersion {
    numbers: Vec<u64>,
    pre: Option<String>,
    build: Option<u64>,
    opt: Option<String>,
}

impl JdkVersion {
    /// The dot-separated numeric components, e.g. `[21, 0, 2]`.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// The `+<build>` component, if present.
    pub fn build(&self) -> Option<u64> {
        self.build
    }

    fn parse_base(s: &str) -> Option<Self> {
        let caps = BASE_FORM.captures(s)?;
        let mut numbers = Vec::new();
        for part in caps["nums"].split('.') {
            numbers.push(part.parse().ok()?);
        }
        let build = match caps.name("build") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        Some(Self {
            numbers,
            pre: caps.name("pre").map(|m| m.as_str().to_string()),
            build,
            opt: caps.name("opt").map(|m| m.as_str().to_string()),
        })
    }
}

impl FromStr for JdkVersion {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_base(s).ok_or_else(|| parse_error(s, "malformed base runtime version"))
    }
}

impl fmt::Display for JdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for n in &self.numbers {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{n}")?;
            first = false;
        }
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = self.build {
            write!(f, "+{build}")?;
        }
        if let Some(opt) = &self.opt {
            write!(f, "-{opt}")?;
        }
        Ok(())
    }
}

impl Ord for JdkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        for i in 0..len {
            let a = self.numbers.get(i).copied().unwrap_or(0);
            let b = other.numbers.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        // A pre-release sorts below the corresponding release.
        match (&self.pre, &other.pre) {
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
        self.build.cmp(&other.build)
    }
}

impl PartialOrd for JdkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for JdkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JdkVersion {}

/// A JVMCI version in either of the two syntaxes.
///
/// Legacy versions are an ordered `(major, minor, build)` triple. New-form
/// versions pair a [`JdkVersion`] base with a JVMCI build number. Every
/// new-form version orders above every legacy one, since the new syntax
/// postdates the legacy one. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    base: Base,
    build: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Base {
    Legacy { major: u64, minor: u64 },
    Jdk(JdkVersion),
}

impl Version {
    /// A legacy `<major>.<minor>-b<build>` version.
    pub fn legacy(major: u64, minor: u64, build: u64) -> Self {
        Self {
            base: Base::Legacy { major, minor },
            build,
        }
    }

    /// A new-form version: base runtime version plus JVMCI build number.
    pub fn jdk(base: JdkVersion, jvmci_build: u64) -> Self {
        Self {
            base: Base::Jdk(base),
            build: jvmci_build,
        }
    }

    /// The JVMCI build number (the `-b`/`-jvmci-b` suffix).
    pub fn jvmci_build(&self) -> u64 {
        self.build
    }

    /// Whether this is a legacy-syntax version.
    pub fn is_legacy(&self) -> bool {
        matches!(self.base, Base::Legacy { .. })
    }

    /// All numeric components, base first, build last.
    ///
    /// This is the comma-separated line format the outer build harness
    /// reads back from the version file.
    pub fn components(&self) -> Vec<u64> {
        match &self.base {
            Base::Legacy { major, minor } => vec![*major, *minor, self.build],
            Base::Jdk(base) => {
                let mut parts = base.numbers.clone();
                parts.push(self.build);
                parts
            }
        }
    }

    /// Extract a `Version` from a `java.vm.version` string.
    ///
    /// The presence of `-jvmci-b` selects the new syntax; otherwise the
    /// string must contain a legacy `<major>.<minor>-b<build>` segment.
    /// Any string matching neither syntax, and any numeric segment that
    /// does not fit in 64 bits, yields [`CheckError::Parse`].
    pub fn parse(vm_version: &str) -> Result<Self> {
        if vm_version.contains(JVMCI_BUILD_MARKER) {
            let caps = NEW_FORM
                .captures(vm_version)
                .ok_or_else(|| parse_error(vm_version, "malformed JVMCI build suffix"))?;
            let build = parse_component(&caps["build"], vm_version)?;
            let base = JdkVersion::parse_base(&caps["base"])
                .ok_or_else(|| parse_error(vm_version, "malformed base runtime version"))?;
            return Ok(Version::jdk(base, build));
        }

        let caps = LEGACY_FORM
            .captures(vm_version)
            .ok_or_else(|| parse_error(vm_version, "no <major>.<minor>-b<build> segment"))?;
        Ok(Version::legacy(
            parse_component(&caps["major"], vm_version)?,
            parse_component(&caps["minor"], vm_version)?,
            parse_component(&caps["build"], vm_version)?,
        ))
    }
}

impl FromStr for Version {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Base::Legacy { major, minor } => {
                write!(f, "{major}.{minor}-b{:02}", self.build)
            }
            Base::Jdk(base) => write!(f, "{base}-jvmci-b{:02}", self.build),
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.base, &other.base) {
            (
                Base::Legacy { major, minor },
                Base::Legacy {
                    major: other_major,
                    minor: other_minor,
                },
            ) => (major, minor, self.build).cmp(&(other_major, other_minor, other.build)),
            (Base::Jdk(a), Base::Jdk(b)) => a.cmp(b).then(self.build.cmp(&other.build)),
            (Base::Legacy { .. }, Base::Jdk(_)) => Ordering::Less,
            (Base::Jdk(_), Base::Legacy { .. }) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_component(digits: &str, vm_version: &str) -> Result<u64> {
    digits.parse().map_err(|_| {
        parse_error(
            vm_version,
            &format!("numeric component `{digits}` is out of range"),
        )
    })
}

fn parse_error(vm_version: &str, reason: &str) -> CheckError {
    CheckError::Parse {
        vm_version: vm_version.to_string(),
        reason: reason.to_string(),
    }
}
