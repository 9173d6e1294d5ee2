//! Layer identifiers for feature collections published by the map server.

use serde::{Deserialize, Serialize};

use crate::{OgcError, OgcResult};

/// Name of a feature collection on the remote server, e.g. `geonode:cpi_layer`.
///
/// Always non-empty; construct through [`LayerId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LayerId(String);

impl LayerId {
    /// Validate and wrap a layer name.
    pub fn parse(s: impl Into<String>) -> OgcResult<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(OgcError::invalid_input("layer id must not be empty"));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Workspace prefix of a qualified name (`geonode` in `geonode:cpi_layer`).
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ns, _)| ns)
    }

    /// Name without the workspace prefix.
    pub fn local_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LayerId {
    type Err = OgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LayerId {
    type Error = OgcError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<LayerId> for String {
    fn from(id: LayerId) -> Self {
        id.0
    }
}

impl AsRef<str> for LayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_name() {
        let id = LayerId::parse("geonode:cpi_layer").unwrap();
        assert_eq!(id.namespace(), Some("geonode"));
        assert_eq!(id.local_name(), "cpi_layer");
        assert_eq!(id.to_string(), "geonode:cpi_layer");
    }

    #[test]
    fn test_unqualified_name() {
        let id: LayerId = "roads".parse().unwrap();
        assert_eq!(id.namespace(), None);
        assert_eq!(id.local_name(), "roads");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(LayerId::parse(""), Err(OgcError::InvalidInput(_))));
        assert!(matches!(LayerId::parse("   "), Err(OgcError::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: LayerId = serde_json::from_str("\"geonode:x\"").unwrap();
        assert_eq!(ok.as_str(), "geonode:x");
        assert!(serde_json::from_str::<LayerId>("\"\"").is_err());
    }
}
