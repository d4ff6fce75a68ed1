use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichText};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Unknown($pattern) => $result,
        }
    };
}

/// One unit of a post's body, in document order.
///
/// The set of kinds is closed; anything else the API returns lands in
/// [`Block::Unknown`] with its raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Code(CodeBlock),
    Image(ImageBlock),
    Unknown(UnknownBlock),
}

/// Which list container a list item belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// The remote type tag this block was built from.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Code(_) => "code",
            Block::Image(_) => "image",
            Block::Unknown(b) => &b.kind,
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Rich text of text-bearing kinds.
    pub fn rich_text(&self) -> Option<&RichText> {
        match self {
            Block::Paragraph(b) => Some(&b.content),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => Some(&b.content),
            Block::BulletedListItem(b) | Block::NumberedListItem(b) => Some(&b.content),
            Block::ToDo(b) => Some(&b.content),
            Block::Toggle(b) => Some(&b.content),
            Block::Code(b) => Some(&b.content),
            Block::Image(_) | Block::Unknown(_) => None,
        }
    }

    /// Plain text of text-bearing kinds; empty for images and unknown blocks.
    pub fn text(&self) -> String {
        self.rich_text().map(RichText::text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ListItemBlock {
        ListItemBlock {
            common: BlockCommon::new(BlockId::from_remote(id)),
            content: RichText::plain("item"),
        }
    }

    #[test]
    fn list_kinds_are_classified() {
        assert_eq!(
            Block::BulletedListItem(item("a")).list_kind(),
            Some(ListKind::Bulleted)
        );
        assert_eq!(
            Block::NumberedListItem(item("b")).list_kind(),
            Some(ListKind::Numbered)
        );
        let paragraph = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(BlockId::from_remote("c")),
            content: RichText::plain("text"),
        });
        assert_eq!(paragraph.list_kind(), None);
    }

    #[test]
    fn unknown_blocks_report_their_original_tag() {
        let block = Block::Unknown(UnknownBlock {
            common: BlockCommon::new(BlockId::from_remote("x")),
            kind: "embed".to_string(),
            raw: serde_json::json!({ "url": "https://example.com" }),
        });
        assert_eq!(block.block_type(), "embed");
        assert_eq!(block.text(), "");
        assert_eq!(block.id().as_str(), "x");
    }
}
