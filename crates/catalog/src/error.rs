use thiserror::Error;

/// Errors that can occur when validating products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not validate the requested products.
    ///
    /// Transport errors, timeouts, and remote-side rejections all land
    /// here; the remote detail is kept only for logging.
    #[error("Product validation unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
