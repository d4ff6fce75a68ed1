// src/lib.rs
//! notion-blog library: reads blog posts out of a Notion database and
//! renders their content into HTML presentation nodes.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `BlogConfig`, `CommandLineInput`
//! - **Domain model**: `PostSummary`, `Block` and its payload structs, `ReadingTime`
//! - **Document store**: the `DocumentStore` seam and `NotionHttpClient`
//! - **Normalization**: `ContentNormalizer`, `GenerationCache`
//! - **Rendering**: `render_blocks`, `render_document`, `compose_text`, `Node`

pub mod api;
mod config;
mod constants;
mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BlogCommand, BlogConfig, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{
    slugify, Block, BlockCommon, CodeBlock, HeadingBlock, ImageBlock, ListItemBlock, ListKind,
    ParagraphBlock, PostSummary, ReadingTime, ToDoBlock, ToggleBlock, UnknownBlock,
};

// --- Domain Types ---
pub use crate::types::{AnnotationSet, ApiKey, BlockId, DatabaseId, PageId, RichText, TextRun};

// --- Document Store ---
pub use crate::api::{DatabaseQuery, DocumentStore, NotionHttpClient};

// --- Normalization ---
pub use crate::normalize::{ContentNormalizer, GenerationCache};

// --- Rendering ---
pub use crate::render::{
    compose_text, nodes_to_html, render_block, render_blocks, render_document, Node,
};
