//! Error type for configuration and snapshot loading
//!
//! The physics itself never fails; only the I/O edges do.

use std::fmt;

#[derive(Debug)]
pub enum SimError {
    /// Reading a config or snapshot file failed
    Io(std::io::Error),
    /// Malformed JSON
    Parse(serde_json::Error),
    /// A config value is outside its allowed range
    InvalidConfig { field: &'static str, reason: String },
}

impl SimError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "failed to read file: {}", e),
            SimError::Parse(e) => write!(f, "invalid JSON: {}", e),
            SimError::InvalidConfig { field, reason } => {
                write!(f, "invalid config value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            SimError::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_field() {
        let err = SimError::invalid("gravity", "must be finite");
        assert_eq!(err.to_string(), "invalid config value `gravity`: must be finite");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SimError::from(json_err);
        assert!(matches!(err, SimError::Parse(_)));
        assert!(err.source().is_some());
    }
}
