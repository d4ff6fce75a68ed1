// src/render/block_renderer.rs
//! Block rendering engine: converts blocks to presentation nodes.
//!
//! Rendering is a single forward pass. Adjacent list items of the same kind
//! are coalesced into one list container; everything else maps to exactly
//! one node. Adjacency is purely positional, so any non-list block between
//! two items starts a new list.

use super::inline::{compose_primary, compose_runs};
use super::node::{Element, Node};
use crate::model::{
    Block, CodeBlock, HeadingBlock, ImageBlock, ListItemBlock, ListKind, ToDoBlock, ToggleBlock,
    UnknownBlock,
};

const DOCUMENT_CLASS: &str = "notion-content";
const EMPTY_DOCUMENT_TEXT: &str = "No content";
const IMAGE_FALLBACK_ALT: &str = "Image";

/// Attribute carrying a block's id on the node rendered for it.
const BLOCK_ID_ATTR: &str = "data-block-id";
/// Attribute carrying a list container's key. List containers have no
/// block of their own, so their keys live apart from block ids.
const LIST_KEY_ATTR: &str = "data-list-key";

// --- Public API ---

/// Renders a block sequence, grouping consecutive list items.
pub fn render_blocks(blocks: &[Block]) -> Vec<Node> {
    let mut output = Vec::with_capacity(blocks.len());
    let mut pending: Vec<&ListItemBlock> = Vec::new();
    let mut current_kind: Option<ListKind> = None;

    for (i, block) in blocks.iter().enumerate() {
        let Some((kind, item)) = as_list_item(block) else {
            output.push(render_block(block));
            continue;
        };

        if let Some(previous) = current_kind {
            if previous != kind && !pending.is_empty() {
                output.push(render_list(previous, &pending));
                pending.clear();
            }
        }
        pending.push(item);
        current_kind = Some(kind);

        let next_is_list = blocks.get(i + 1).and_then(Block::list_kind).is_some();
        if !next_is_list {
            output.push(render_list(kind, &pending));
            pending.clear();
            current_kind = None;
        }
    }

    log::debug!(
        "Rendered {} blocks into {} nodes",
        blocks.len(),
        output.len()
    );
    output
}

/// Wraps a rendered post body in the document container.
///
/// An empty body gets a visible placeholder instead of an empty container.
pub fn render_document(blocks: &[Block]) -> Node {
    let container = Node::element("div").attr("class", DOCUMENT_CLASS);
    if blocks.is_empty() {
        return container
            .child(
                Node::element("div")
                    .attr("class", "no-content")
                    .child(Node::text(EMPTY_DOCUMENT_TEXT)),
            )
            .into();
    }
    container.children(render_blocks(blocks)).into()
}

/// Renders one block on its own.
///
/// A list item rendered here becomes a bare `<li>`; use [`render_blocks`]
/// to get list containers.
pub fn render_block(block: &Block) -> Node {
    let element = match block {
        Block::Paragraph(p) => Node::element("p").children(compose_runs(&p.content)),
        Block::Heading1(h) => render_heading("h1", h),
        Block::Heading2(h) => render_heading("h2", h),
        Block::Heading3(h) => render_heading("h3", h),
        Block::BulletedListItem(item) | Block::NumberedListItem(item) => render_list_item(item),
        Block::ToDo(todo) => render_to_do(todo),
        Block::Toggle(toggle) => render_toggle(toggle),
        Block::Code(code) => render_code(code),
        Block::Image(image) => render_image(image),
        Block::Unknown(unknown) => render_unknown(unknown),
    };
    with_block_id(element, block).into()
}

// --- List containers ---

fn as_list_item(block: &Block) -> Option<(ListKind, &ListItemBlock)> {
    match block {
        Block::BulletedListItem(item) => Some((ListKind::Bulleted, item)),
        Block::NumberedListItem(item) => Some((ListKind::Numbered, item)),
        _ => None,
    }
}

fn render_list(kind: ListKind, items: &[&ListItemBlock]) -> Node {
    let tag = match kind {
        ListKind::Bulleted => "ul",
        ListKind::Numbered => "ol",
    };
    let key = items
        .first()
        .map(|item| format!("list-{}", item.common.id))
        .unwrap_or_else(|| "list".to_string());

    Node::element(tag)
        .attr(LIST_KEY_ATTR, key)
        .children(items.iter().map(|item| {
            render_list_item(item)
                .attr(BLOCK_ID_ATTR, item.common.id.as_str())
                .into()
        }))
        .into()
}

// --- Per-kind shapes ---

fn with_block_id(element: Element, block: &Block) -> Element {
    element.attr(BLOCK_ID_ATTR, block.id().as_str())
}

fn render_heading(tag: &'static str, heading: &HeadingBlock) -> Element {
    Node::element(tag).children(compose_primary(&heading.content))
}

fn render_list_item(item: &ListItemBlock) -> Element {
    Node::element("li").children(compose_primary(&item.content))
}

fn render_to_do(todo: &ToDoBlock) -> Element {
    let mut checkbox = Node::element("input")
        .attr("type", "checkbox")
        .flag("disabled");
    if todo.checked {
        checkbox = checkbox.flag("checked");
    }
    Node::element("div")
        .attr("class", "to-do")
        .child(checkbox)
        .child(Node::element("span").children(compose_primary(&todo.content)))
}

fn render_toggle(toggle: &ToggleBlock) -> Element {
    Node::element("details")
        .child(Node::element("summary").children(compose_primary(&toggle.content)))
}

fn render_code(code: &CodeBlock) -> Element {
    let mut inner = Node::element("code");
    if !code.language.is_empty() {
        inner = inner.attr("class", format!("language-{}", code.language));
    }
    let source = code.content.text();
    if !source.is_empty() {
        inner = inner.child(Node::text(source));
    }

    let block = Node::element("div")
        .attr("class", "code-block")
        .child(Node::element("pre").child(inner));
    if code.language.is_empty() {
        return block;
    }
    block.child(
        Node::element("div")
            .attr("class", "code-language")
            .child(Node::text(code.language.as_str())),
    )
}

fn render_image(image: &ImageBlock) -> Element {
    let alt = if image.caption.is_empty() {
        IMAGE_FALLBACK_ALT
    } else {
        image.caption.as_str()
    };
    let figure = Node::element("figure").child(
        Node::element("img")
            .attr("src", image.url.as_str())
            .attr("alt", alt),
    );
    if image.caption.is_empty() {
        return figure;
    }
    figure.child(Node::element("figcaption").child(Node::text(image.caption.as_str())))
}

fn render_unknown(unknown: &UnknownBlock) -> Element {
    log::debug!(
        "Rendering placeholder for unsupported block {} ({})",
        unknown.common.id,
        unknown.kind
    );
    Node::element("div")
        .attr("class", "unsupported-block")
        .child(Node::text(format!("Unsupported block type: {}", unknown.kind)))
}
