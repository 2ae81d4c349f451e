//! CPU architecture naming
//!
//! Install configuration names architectures the Go/Debian way (`amd64`,
//! `arm64`); manifests consumed by the assisted installer use RPM names
//! (`x86_64`, `aarch64`). [`normalize`] maps the former to the latter and
//! leaves everything else untouched, so applying it twice is harmless.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Map a platform-convention tag to its packaging-convention name
///
/// Unrecognized tags, including values already in packaging convention,
/// pass through unchanged.
///
/// # Examples
/// ```
/// # use bootstrap_manifests::arch::normalize;
/// assert_eq!(normalize("amd64"), "x86_64");
/// assert_eq!(normalize("arm64"), "aarch64");
/// assert_eq!(normalize("aarch64"), "aarch64");
/// assert_eq!(normalize("ppc64le"), "ppc64le");
/// ```
#[must_use]
pub fn normalize(tag: &str) -> &str {
    match tag {
        "amd64" => "x86_64",
        "arm64" => "aarch64",
        other => other,
    }
}

/// Map a packaging-convention tag back to its platform-convention name
#[must_use]
pub fn platform_name(tag: &str) -> &str {
    match tag {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    }
}

/// Architectures an InfraEnv manifest may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86_64,
    Aarch64,
    Ppc64le,
}

impl Architecture {
    /// Every supported architecture
    pub const SUPPORTED: [Architecture; 3] = [Self::X86_64, Self::Aarch64, Self::Ppc64le];

    /// Packaging-convention name
    #[inline]
    #[must_use]
    pub fn rpm_name(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::Ppc64le => "ppc64le",
        }
    }

    /// Platform-convention name
    #[inline]
    #[must_use]
    pub fn platform_name(self) -> &'static str {
        platform_name(self.rpm_name())
    }

    /// Resolve a tag in either convention
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let rpm = normalize(tag);
        Self::SUPPORTED.into_iter().find(|arch| arch.rpm_name() == rpm)
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.rpm_name())
    }
}

impl FromStr for Architecture {
    type Err = UnknownArchitecture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownArchitecture(s.to_string()))
    }
}

/// Tag outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown architecture: {0}")]
pub struct UnknownArchitecture(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn platform_names_convert() {
        assert_eq!(normalize("amd64"), "x86_64");
        assert_eq!(normalize("arm64"), "aarch64");
    }

    #[test]
    fn unknown_and_empty_pass_through() {
        assert_eq!(normalize("s390x"), "s390x");
        assert_eq!(normalize("riscv64"), "riscv64");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn platform_name_reverses_normalize() {
        for tag in ["amd64", "arm64", "ppc64le"] {
            assert_eq!(platform_name(normalize(tag)), tag);
        }
    }

    #[test]
    fn architecture_from_either_convention() {
        assert_eq!(Architecture::from_tag("arm64"), Some(Architecture::Aarch64));
        assert_eq!(Architecture::from_tag("aarch64"), Some(Architecture::Aarch64));
        assert_eq!(Architecture::from_tag("amd64"), Some(Architecture::X86_64));
        assert_eq!(Architecture::from_tag("ppc64le"), Some(Architecture::Ppc64le));
        assert_eq!(Architecture::from_tag("s390x"), None);
        assert_eq!(Architecture::from_tag(""), None);
    }

    #[test]
    fn architecture_names() {
        assert_eq!(Architecture::Aarch64.to_string(), "aarch64");
        assert_eq!(Architecture::Aarch64.platform_name(), "arm64");
        assert_eq!(Architecture::Ppc64le.platform_name(), "ppc64le");
    }

    #[test]
    fn architecture_parse_error() {
        let err = "unsupported-value".parse::<Architecture>().unwrap_err();
        assert_eq!(err, UnknownArchitecture("unsupported-value".into()));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(tag in ".*") {
            let once = normalize(&tag);
            prop_assert_eq!(normalize(once), once);
        }

        #[test]
        fn prop_normalize_is_idempotent_on_known_tags(
            tag in prop::sample::select(vec!["amd64", "arm64", "x86_64", "aarch64", "ppc64le", "s390x", ""]),
        ) {
            let once = normalize(tag);
            prop_assert_eq!(normalize(once), once);
        }
    }
}
