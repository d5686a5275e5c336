use core::fmt;

/// Failure while loading [`Settings`](crate::Settings)
#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Settings JSON was malformed or had wrong field types
    Parse(serde_json::Error),
    /// A tuning value is outside the range the simulation can handle
    InvalidValue { field: &'static str, value: f64 },
    /// Quality preset name not recognised
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read settings {path}: {source}"),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid settings value {field}={value}")
            }
            Self::UnknownPreset(name) => {
                write!(f, "unknown quality preset {name:?}, expected low, medium or high")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } | Self::UnknownPreset(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
