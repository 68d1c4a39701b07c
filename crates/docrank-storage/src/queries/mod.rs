//! SQL for the storage table and its ranking index.

pub mod document_crud;
pub mod document_search;
pub mod maintenance;
