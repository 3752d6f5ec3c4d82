/// Errors from an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Text generation API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered but produced no text.
    #[error("Text generation returned an empty response")]
    EmptyResponse,

    /// The generated text did not match the requested JSON shape.
    #[error("Malformed generated output: {0}")]
    Malformed(#[from] serde_json::Error),

    /// No provider is configured.
    #[error("Text generation is not configured")]
    Unavailable,
}
