//! Projection of remote block objects into [`Block`] values.
//!
//! Projection is total: every remote block yields exactly one [`Block`].
//! Unrecognized tags, and recognized tags whose payload does not decode,
//! become [`Block::Unknown`] carrying the untouched remote value.

use super::text::{plain_text, to_runs};
use crate::api::responses::{CodePayload, ImagePayload, TextPayload, ToDoPayload};
use crate::model::{
    Block, BlockCommon, CodeBlock, HeadingBlock, ImageBlock, ListItemBlock, ParagraphBlock,
    ToDoBlock, ToggleBlock, UnknownBlock,
};
use crate::types::{BlockId, RichText};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;

/// Tag recorded for blocks that arrive without a `type`.
const UNTYPED_BLOCK: &str = "untyped";

/// Projects a document's direct children, keeping their order.
///
/// Block ids are used as render keys, so a missing id is replaced with a
/// positional one and a repeated id gets a positional suffix.
pub fn project_blocks(items: Vec<Value>) -> Vec<Block> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let id = unique_block_id(&item, position, &mut seen);
            project_block(item, id)
        })
        .collect()
}

fn unique_block_id(item: &Value, position: usize, seen: &mut HashSet<String>) -> BlockId {
    let id = match item.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            log::warn!("Block at position {} has no id", position);
            format!("block-{}", position)
        }
    };
    let id = if seen.contains(&id) {
        log::warn!("Duplicate block id {} at position {}", id, position);
        let mut candidate = format!("{}-{}", id, position);
        let mut attempt = 1;
        // the suffixed form may itself be a real id seen earlier
        while seen.contains(&candidate) {
            candidate = format!("{}-{}-{}", id, position, attempt);
            attempt += 1;
        }
        candidate
    } else {
        id
    };
    seen.insert(id.clone());
    BlockId::from_remote(id)
}

/// Projects one block. Never fails.
pub fn project_block(item: Value, id: BlockId) -> Block {
    let has_children = item
        .get("has_children")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let common = BlockCommon::new(id).with_children_flag(has_children);

    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(UNTYPED_BLOCK)
        .to_string();

    if has_children {
        log::debug!(
            "Block {} ({}) has children; nested content is not fetched",
            common.id,
            kind
        );
    }

    let payload = item.get(&kind).unwrap_or(&Value::Null);
    let projected = match kind.as_str() {
        "paragraph" => Some(decode::<TextPayload>(payload).map(|p| {
            Block::Paragraph(ParagraphBlock {
                common: common.clone(),
                content: RichText::new(to_runs(p.rich_text)),
            })
        })),
        "heading_1" => Some(
            decode::<TextPayload>(payload).map(|p| Block::Heading1(heading(common.clone(), p))),
        ),
        "heading_2" => Some(
            decode::<TextPayload>(payload).map(|p| Block::Heading2(heading(common.clone(), p))),
        ),
        "heading_3" => Some(
            decode::<TextPayload>(payload).map(|p| Block::Heading3(heading(common.clone(), p))),
        ),
        "bulleted_list_item" => Some(
            decode::<TextPayload>(payload)
                .map(|p| Block::BulletedListItem(list_item(common.clone(), p))),
        ),
        "numbered_list_item" => Some(
            decode::<TextPayload>(payload)
                .map(|p| Block::NumberedListItem(list_item(common.clone(), p))),
        ),
        "to_do" => Some(decode::<ToDoPayload>(payload).map(|p| {
            Block::ToDo(ToDoBlock {
                common: common.clone(),
                content: RichText::collapsed(to_runs(p.rich_text)),
                checked: p.checked,
            })
        })),
        "toggle" => Some(decode::<TextPayload>(payload).map(|p| {
            Block::Toggle(ToggleBlock {
                common: common.clone(),
                content: RichText::collapsed(to_runs(p.rich_text)),
            })
        })),
        "code" => Some(decode::<CodePayload>(payload).map(|p| {
            Block::Code(CodeBlock {
                common: common.clone(),
                content: RichText::collapsed(to_runs(p.rich_text)),
                language: p.language,
            })
        })),
        "image" => Some(decode::<ImagePayload>(payload).map(|p| {
            Block::Image(ImageBlock {
                common: common.clone(),
                caption: plain_text(&p.caption),
                url: p.source.into_url(),
            })
        })),
        _ => None,
    };

    match projected {
        Some(Ok(block)) => block,
        Some(Err(e)) => {
            log::warn!(
                "Block {} of type '{}' could not be decoded ({}); kept as unknown",
                common.id,
                kind,
                e
            );
            unknown(common, kind, item)
        }
        None => {
            log::debug!("Unrecognized block type '{}' kept as unknown", kind);
            unknown(common, kind, item)
        }
    }
}

fn unknown(common: BlockCommon, kind: String, raw: Value) -> Block {
    Block::Unknown(UnknownBlock { common, kind, raw })
}

fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(payload)
}

fn heading(common: BlockCommon, payload: TextPayload) -> HeadingBlock {
    HeadingBlock {
        common,
        content: RichText::collapsed(to_runs(payload.rich_text)),
    }
}

fn list_item(common: BlockCommon, payload: TextPayload) -> ListItemBlock {
    ListItemBlock {
        common,
        content: RichText::collapsed(to_runs(payload.rich_text)),
    }
}
