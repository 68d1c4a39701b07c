/// Ranked query errors.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("ranking query failed: {reason}")]
    ExecutionFailed { reason: String },

    #[error("stored metadata for document {id} is not a JSON object: {reason}")]
    MalformedMetadata { id: String, reason: String },
}
