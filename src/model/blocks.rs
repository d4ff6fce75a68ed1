use super::common::BlockCommon;
use crate::types::RichText;
use serde::{Deserialize, Serialize};

/// Paragraph block; the only kind that keeps every run's formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: RichText,
}

/// Heading block, shared by all three levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: RichText,
}

/// Bulleted or numbered list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemBlock {
    pub common: BlockCommon,
    pub content: RichText,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: RichText,
    pub checked: bool,
}

/// Toggle block. Its children are not fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: RichText,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub content: RichText,
    /// May be empty.
    pub language: String,
}

/// Image block. External links and hosted files both resolve to `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: String,
}

/// Any block this crate does not model, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownBlock {
    pub common: BlockCommon,
    /// The remote `type` tag, e.g. `"embed"`.
    pub kind: String,
    pub raw: serde_json::Value,
}
