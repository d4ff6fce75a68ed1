//! Normalized records handed from the normalizer to the renderer.

mod block;
pub mod blocks;
pub mod common;
mod post;
mod reading_time;

pub use block::{Block, ListKind};
pub use blocks::*;
pub use common::*;
pub use post::{slugify, sort_posts_by_date_desc, PostSummary};
pub use reading_time::ReadingTime;
