/// docrank version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of the stored content fingerprint, in hex characters.
pub const CONTENT_HASH_LEN: usize = 32;

/// Suffix appended to the table name to form the ranking index name.
pub const RANKING_INDEX_SUFFIX: &str = "_bm25";

/// Longest table name accepted by [`crate::models::TableName`].
pub const MAX_TABLE_NAME_LEN: usize = 48;

/// Metadata key injected into search results carrying the document id.
pub const METADATA_ID_KEY: &str = "id";

/// Metadata key injected into search results carrying the relevance score.
pub const METADATA_SCORE_KEY: &str = "relevance_score";

/// Environment flag that enables query suffix stripping when set to `"True"`.
pub const ENV_STRIP_SUFFIX: &str = "use_re2";

/// Environment variable holding the suffix marker text.
pub const ENV_SUFFIX_MARKER: &str = "re2_prompt";
