//! Errors raised while importing a record

use super::response::Unextractable;
use crate::config::ConfigurationError;
use crate::http::TransportError;

/// Failure to import a record into the remote destination
///
/// Every variant aborts the import of that one record. Whether the
/// migration run continues is up to the caller.
#[derive(Debug)]
pub enum ExportError {
    /// Destination settings are unusable; no record can be imported
    Configuration(ConfigurationError),
    /// The request did not complete
    Transport(TransportError),
    /// The endpoint answered with a status outside 2xx
    RemoteRejection { status: u16 },
    /// The endpoint accepted the record but returned no usable identifier
    UnextractableIdentifier(Unextractable),
}

impl ExportError {
    /// Whether the endpoint was reached but the POST did not produce a result
    ///
    /// Rejections and unusable responses share this signal; callers that only
    /// care whether the POST worked can treat them alike.
    pub fn is_post_failure(&self) -> bool {
        matches!(
            self,
            ExportError::RemoteRejection { .. } | ExportError::UnextractableIdentifier(_)
        )
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Configuration(e) => write!(f, "configuration error: {}", e),
            ExportError::Transport(e) => write!(f, "transport failure: {}", e),
            ExportError::RemoteRejection { status } => {
                write!(f, "POST unsuccessful: remote responded with status {}", status)
            }
            ExportError::UnextractableIdentifier(reason) => {
                write!(f, "POST unsuccessful: {}", reason)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Configuration(e) => Some(e),
            ExportError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for ExportError {
    fn from(e: ConfigurationError) -> Self {
        ExportError::Configuration(e)
    }
}

impl From<TransportError> for ExportError {
    fn from(e: TransportError) -> Self {
        ExportError::Transport(e)
    }
}

impl From<Unextractable> for ExportError {
    fn from(reason: Unextractable) -> Self {
        ExportError::UnextractableIdentifier(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_failure_classification() {
        assert!(ExportError::RemoteRejection { status: 500 }.is_post_failure());
        assert!(ExportError::from(Unextractable::NoMatchingKeys).is_post_failure());
        assert!(!ExportError::from(TransportError::new("dns")).is_post_failure());
        assert!(!ExportError::from(ConfigurationError::MissingUrlProperty).is_post_failure());
    }

    #[test]
    fn test_messages_share_prefix() {
        let rejected = ExportError::RemoteRejection { status: 422 };
        let unusable = ExportError::from(Unextractable::NoMatchingKeys);
        assert!(rejected.to_string().starts_with("POST unsuccessful"));
        assert!(unusable.to_string().starts_with("POST unsuccessful"));
        assert!(rejected.to_string().contains("422"));
    }
}
