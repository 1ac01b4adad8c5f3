use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapTransError {
    /// Descriptor and source disagree structurally. A configuration defect, not bad data.
    #[error("internal error: {reason}")]
    Internal { reason: String },

    #[error("missing mandatory attribute '{name}'")]
    MissingAttribute { name: String },

    /// `name` is always the source field name.
    #[error("property '{name}' is invalid: {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("values do not match: {reason}")]
    Mismatch { reason: String },

    #[error("unsupported translation type {kind}")]
    UnsupportedTranslation { kind: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error in '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Internal,
    Data,
    Configuration,
    Io,
}

impl MapTransError {
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    pub fn invalid_property(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidProperty {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Mismatch {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Internal { .. } | Self::UnsupportedTranslation { .. } => ErrorCategory::Internal,
            Self::MissingAttribute { .. }
            | Self::InvalidProperty { .. }
            | Self::Mismatch { .. }
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Process exit code used by the command line tool.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::Data => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Io => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapTransError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = MapTransError::invalid_property("A1", "invalid type");
        assert_eq!(err.to_string(), "property 'A1' is invalid: invalid type");

        let err = MapTransError::missing_attribute("uuid");
        assert_eq!(err.to_string(), "missing mandatory attribute 'uuid'");
    }

    #[test]
    fn test_category_and_exit_code() {
        assert_eq!(
            MapTransError::internal("bad shape").category(),
            ErrorCategory::Internal
        );
        assert_eq!(MapTransError::missing_attribute("x").exit_code(), 2);
        assert_eq!(
            MapTransError::ConfigError {
                message: "nope".to_string()
            }
            .exit_code(),
            3
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(MapTransError::from(io).category(), ErrorCategory::Io);
    }
}
