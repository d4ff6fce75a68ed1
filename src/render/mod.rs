// src/render/mod.rs
//! Turns normalized blocks into presentation nodes for the page template.

pub mod block_renderer;
mod inline;
mod node;

pub use self::block_renderer::{render_block, render_blocks, render_document};
pub use self::inline::{compose_runs, compose_text};
pub use self::node::{nodes_to_html, Element, Node};
