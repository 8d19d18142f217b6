use thiserror::Error;

/// Unified error type for the entire storefront-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog ─────────────────────────────────────────────────────
    #[error("Failed to load catalog: {0}")]
    Fetch(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // ── Durable storage ─────────────────────────────────────────────
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// Message suitable for an on-screen error state.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Fetch(_) => {
                "The cards could not be loaded. Please try again later.".to_string()
            }
            CoreError::ProductNotFound(_) => {
                "This card could not be found. Return to the catalog and try again.".to_string()
            }
            CoreError::Persistence(_) => {
                "Your cart could not be saved. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; keep the query string out of logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Fetch(sanitized)
    }
}
