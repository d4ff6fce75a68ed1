use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    /// The remote block has nested children. They are never fetched, so
    /// this only records that content was left out.
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
        }
    }

    pub fn with_children_flag(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }
}
