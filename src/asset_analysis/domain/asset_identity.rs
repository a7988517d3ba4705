use crate::shared::error::AnalysisError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for asset identities (security limit)
const MAX_IDENTITY_LENGTH: usize = 512;

/// NewType wrapper for the stable key of an asset (GUID, content hash, ...)
///
/// Identities are compared byte-for-byte and ordered lexicographically.
/// They are the only key used by the graph; display paths never are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetIdentity(String);

impl AssetIdentity {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(AnalysisError::Validation {
                message: "Asset identity cannot be empty".to_string(),
            }
            .into());
        }

        if id.len() > MAX_IDENTITY_LENGTH {
            return Err(AnalysisError::Validation {
                message: format!(
                    "Asset identity is too long ({} bytes). Maximum allowed: {} bytes",
                    id.len(),
                    MAX_IDENTITY_LENGTH
                ),
            }
            .into());
        }

        if id.chars().any(char::is_control) {
            return Err(AnalysisError::Validation {
                message: "Asset identity contains control characters".to_string(),
            }
            .into());
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetIdentity {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AssetIdentity> for String {
    fn from(id: AssetIdentity) -> Self {
        id.0
    }
}

/// Opaque version token of an asset's current content.
///
/// A cached dependency record is reused only while the fingerprint it was
/// written with still equals the asset's current fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_identity_valid() {
        let id = AssetIdentity::new("4f2a9c0e1b7d4e21").unwrap();
        assert_eq!(id.as_str(), "4f2a9c0e1b7d4e21");
        assert_eq!(format!("{}", id), "4f2a9c0e1b7d4e21");
    }

    #[test]
    fn test_asset_identity_empty() {
        let result = AssetIdentity::new("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_asset_identity_too_long() {
        let result = AssetIdentity::new("a".repeat(MAX_IDENTITY_LENGTH + 1));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_asset_identity_rejects_control_characters() {
        assert!(AssetIdentity::new("abc\n").is_err());
    }

    #[test]
    fn test_asset_identity_ordering_is_lexicographic() {
        let a = AssetIdentity::new("A").unwrap();
        let b = AssetIdentity::new("B").unwrap();
        let lower = AssetIdentity::new("a").unwrap();
        assert!(a < b);
        assert!(b < lower);
    }

    #[test]
    fn test_asset_identity_serde_rejects_empty() {
        let parsed: std::result::Result<AssetIdentity, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: AssetIdentity = serde_json::from_str("\"guid-1\"").unwrap();
        assert_eq!(parsed.as_str(), "guid-1");
    }

    #[test]
    fn test_fingerprint_equality() {
        assert_eq!(Fingerprint::new("v1"), Fingerprint::new("v1"));
        assert_ne!(Fingerprint::new("v1"), Fingerprint::new("v2"));
    }
}
