/// Schema and ranking-index provisioning errors.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("ranking extension unavailable: {reason}")]
    ExtensionMissing { reason: String },

    #[error("failed to create table {table}: {reason}")]
    TableCreation { table: String, reason: String },

    #[error("failed to create ranking index {index}: {reason}")]
    IndexCreation { index: String, reason: String },
}
