use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single API call.
///
/// `Status` carries the server's `detail` so the UI can show it inline;
/// everything else is a transport problem with no body to quote.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{detail}")]
    Status { status: StatusCode, detail: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth token not set")]
    MissingToken,

    #[error("invalid server URL: {0}")]
    BadUrl(String),
}

impl ApiError {
    /// Message suitable for inline display next to the triggering control.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use reqwest::StatusCode;

    #[test]
    fn status_error_displays_the_server_detail() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: "Incorrect username or password".to_string(),
        };
        assert_eq!(err.detail(), "Incorrect username or password");
    }
}
