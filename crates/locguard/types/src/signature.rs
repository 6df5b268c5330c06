//! Spoofing-tool signatures.

use serde::{Deserialize, Serialize};

/// How a spoofing signature is matched against the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    /// A package/bundle identifier, matched against the installed set.
    PackageId,
    /// A display name, probed as a launchable application.
    AppName,
    /// A custom URL scheme, probed for resolvability.
    UrlScheme,
}

impl std::fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureKind::PackageId => write!(f, "package_id"),
            SignatureKind::AppName => write!(f, "app_name"),
            SignatureKind::UrlScheme => write!(f, "url_scheme"),
        }
    }
}

/// One known location-spoofing tool.
///
/// Package identifiers are preferred over name-string matches wherever
/// the platform exposes them; name and scheme entries carry a known
/// false-positive risk from unrelated apps sharing the string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoofSignature {
    /// The identifier to look for on the device.
    pub identifier: String,

    /// How the identifier is matched.
    pub kind: SignatureKind,
}

impl SpoofSignature {
    pub fn new(identifier: impl Into<String>, kind: SignatureKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
        }
    }
}
