/// Errors from the backend client.
///
/// `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request exceeded the configured timeout ({ms}ms)")]
    Timeout { ms: u64 },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("invalid server response")]
    EmptyBody,

    #[error("invalid response data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header {name}")]
    InvalidHeader { name: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}

impl ApiError {
    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(_) | ApiError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_user_message() {
        let err = ApiError::Api {
            status: 422,
            message: "Name is required".into(),
        };
        assert_eq!(err.to_string(), "Name is required");
        assert_eq!(err.status(), Some(422));
        assert!(!err.is_transport());
    }

    #[test]
    fn timeout_message_carries_limit() {
        let err = ApiError::Timeout { ms: 2500 };
        assert_eq!(
            err.to_string(),
            "request exceeded the configured timeout (2500ms)"
        );
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_detection() {
        let err = ApiError::Api {
            status: 404,
            message: "Game not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!ApiError::EmptyBody.is_not_found());
    }
}
