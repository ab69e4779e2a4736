use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("You must enable GITHUB_TOKEN access for this action")]
    MissingToken,

    #[error("invalid event: {0}")]
    Event(String),

    #[error("Could not find the merge commit")]
    MissingMergeCommit,

    #[error("could not find any versions")]
    NoVersionsFound,

    #[error("version {0} cannot be bumped past the largest patch number")]
    VersionOverflow(String),

    #[error("tag {0} already exists")]
    TagExists(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AutotagError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        AutotagError::Api {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AutotagError::NoVersionsFound.to_string(),
            "could not find any versions"
        );
        assert_eq!(
            AutotagError::TagExists("refs/tags/v1.0.1".to_string()).to_string(),
            "tag refs/tags/v1.0.1 already exists"
        );
        assert_eq!(
            AutotagError::api(404, "Not Found").to_string(),
            "API error (404): Not Found"
        );
        assert_eq!(
            AutotagError::VersionOverflow("1.2.18446744073709551615".to_string()).to_string(),
            "version 1.2.18446744073709551615 cannot be bumped past the largest patch number"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: AutotagError = io_err.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
