use thiserror::Error;

/// Failure taxonomy shared by the geocoding and weather clients.
///
/// Every error is terminal for the current invocation: nothing is retried and
/// the pipeline stops at the first failing stage. A missing CLI argument is
/// reported by the argument parser itself, before any of these can occur.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The geocoding service returned no candidate for the address, or the
    /// address was empty to begin with.
    #[error("address not found: {0}")]
    AddressNotFound(String),

    /// Transport failure or non-success HTTP status from either service.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// A response body that does not match the expected schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
