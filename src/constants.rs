// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many objects one request asks for. The Notion API maximum is 100;
/// later pages of results are not fetched.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Upper bound on a single request, unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How many documents' blocks are fetched at once during batch generation.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Blog database schema
// ---------------------------------------------------------------------------

pub const PROPERTY_TITLE: &str = "Title";
pub const PROPERTY_SLUG: &str = "Slug";
pub const PROPERTY_DATE: &str = "Date";
pub const PROPERTY_SUMMARY: &str = "Summary";
pub const PROPERTY_TAGS: &str = "Tags";
pub const PROPERTY_AUTHOR: &str = "Author";
pub const PROPERTY_PUBLISHED: &str = "Published";

// ---------------------------------------------------------------------------
// Fallback values
// ---------------------------------------------------------------------------

pub const UNTITLED_POST: &str = "Untitled";
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Average adult silent-reading speed.
pub const READING_WORDS_PER_MINUTE: usize = 200;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
