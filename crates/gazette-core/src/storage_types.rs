use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage routing modes
///
/// This enum defines how attachments are routed between backends.
/// It's defined in core because it's used in configuration and by the
/// storage crate's selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Everything on local disk (development, single-host deployments).
    Local,
    /// Everything in the remote media service.
    Remote,
    /// Images remote, PDFs local unless the filesystem is ephemeral.
    Hybrid,
}

impl FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageMode::Local),
            "remote" => Ok(StorageMode::Remote),
            "hybrid" => Ok(StorageMode::Hybrid),
            _ => Err(anyhow::anyhow!("Invalid storage mode: {}", s)),
        }
    }
}

impl Display for StorageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageMode::Local => write!(f, "local"),
            StorageMode::Remote => write!(f, "remote"),
            StorageMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes_case_insensitively() {
        assert_eq!("local".parse::<StorageMode>().unwrap(), StorageMode::Local);
        assert_eq!("REMOTE".parse::<StorageMode>().unwrap(), StorageMode::Remote);
        assert_eq!("Hybrid".parse::<StorageMode>().unwrap(), StorageMode::Hybrid);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!("s3".parse::<StorageMode>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for mode in [StorageMode::Local, StorageMode::Remote, StorageMode::Hybrid] {
            assert_eq!(mode.to_string().parse::<StorageMode>().unwrap(), mode);
        }
    }
}
