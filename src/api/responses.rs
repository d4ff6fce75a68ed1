// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! Result items stay as raw JSON values at the transport boundary so that
//! one malformed item cannot fail the decoding of its whole batch. The
//! property and block payload shapes below are decoded item by item during
//! normalization.

use crate::types::AnnotationSet;
use serde::Deserialize;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Query and children responses, items undecoded.
pub type RawResultsResponse = PaginatedResponse<serde_json::Value>;

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionError {
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// One inline run of rich text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextWire {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: AnnotationSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectWire {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateWire {
    pub start: String,
}

/// A page property value, tagged by its `type`.
///
/// Property kinds the blog never reads decode to [`PropertyWire::Other`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyWire {
    Title {
        #[serde(default)]
        title: Vec<RichTextWire>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextWire>,
    },
    Date {
        #[serde(default)]
        date: Option<DateWire>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectWire>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectWire>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    #[serde(other)]
    Other,
}

/// Payload of paragraph, heading, list item and toggle blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToDoPayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextWire>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextWire>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Where an image lives: an external link or a Notion-hosted file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    External { external: FileUrl },
    File { file: FileUrl },
}

impl FileSource {
    pub fn into_url(self) -> String {
        match self {
            FileSource::External { external } => external.url,
            FileSource::File { file } => file.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichTextWire>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unread_property_kinds_decode_as_other() {
        let prop: PropertyWire =
            serde_json::from_value(json!({ "id": "x", "type": "number", "number": 4 })).unwrap();
        assert!(matches!(prop, PropertyWire::Other));
    }

    #[test]
    fn image_sources_collapse_to_one_url() {
        let external: ImagePayload = serde_json::from_value(json!({
            "type": "external",
            "external": { "url": "https://cdn.example.com/a.png" },
            "caption": []
        }))
        .unwrap();
        assert_eq!(external.source.into_url(), "https://cdn.example.com/a.png");

        let hosted: ImagePayload = serde_json::from_value(json!({
            "type": "file",
            "file": { "url": "https://s3.example.com/b.png", "expiry_time": "2024-01-01T00:00:00Z" }
        }))
        .unwrap();
        assert_eq!(hosted.source.into_url(), "https://s3.example.com/b.png");
        assert!(hosted.caption.is_empty());
    }
}
