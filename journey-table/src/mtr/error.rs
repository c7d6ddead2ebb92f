//! Fetch error types.

/// Errors from fetching journey records or datasets.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body couldn't be decoded
    #[error("decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Every attempt failed; carries the last failure
    #[error("giving up on {url} after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = FetchError::Decode {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "decode error: expected value");

        let err = FetchError::Exhausted {
            url: "https://example.invalid/x".into(),
            attempts: 6,
            source: Box::new(FetchError::Api {
                status: 500,
                message: "boom".into(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "giving up on https://example.invalid/x after 6 attempts: API error 500: boom"
        );
    }
}
