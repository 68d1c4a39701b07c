mod document;
mod search_result;
mod table_name;

pub use document::{content_hash, Document, Metadata};
pub use search_result::SearchResult;
pub use table_name::TableName;
