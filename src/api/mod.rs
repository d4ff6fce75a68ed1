// src/api/mod.rs
//! Notion API interaction: the ability to query the blog's document store.
//!
//! Business logic depends on the [`DocumentStore`] trait, never on HTTP
//! details. Items come back as raw JSON; turning them into posts and blocks
//! is the normalizer's job.

pub mod client;
pub mod parser;
pub mod query;
pub mod responses;

use crate::error::AppError;
use crate::types::{DatabaseId, PageId};

/// The remote document store: filtered database queries and one level of
/// block children.
///
/// Implementations must be safe to call concurrently for different keys.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Rows of `database` matching `query`, in the order the store returns them.
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<serde_json::Value>, AppError>;

    /// Direct child blocks of `parent`, in document order.
    async fn retrieve_children(
        &self,
        parent: &PageId,
    ) -> Result<Vec<serde_json::Value>, AppError>;
}

pub use client::NotionHttpClient;
pub use query::{DatabaseQuery, FilterCondition, PropertyFilter, PropertySort, SortDirection};
