use thiserror::Error;

/// Main error type for itinerary generation
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status} error: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Itinerary not found: {0}")]
    NotFound(String),

    #[error("Itinerary store error: {0}")]
    Store(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::Http(_) => true,
            PlannerError::Api { status, .. } => *status >= 500,
            PlannerError::RateLimit { .. } => true,
            PlannerError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Whether the error came from talking to the completion endpoint.
    ///
    /// The generation workflow downgrades these to an empty activity list.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PlannerError::Http(_)
                | PlannerError::Api { .. }
                | PlannerError::RateLimit { .. }
                | PlannerError::Timeout(_)
                | PlannerError::InvalidResponse(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Api { .. } => "API_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::InvalidResponse(_) => "INVALID_RESPONSE",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::NotFound(_) => "NOT_FOUND",
            PlannerError::Store(_) => "STORE_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}
