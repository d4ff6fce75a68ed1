// src/api/query.rs
//! Database query bodies: the filter and sort vocabulary the blog needs.

use crate::constants::{NOTION_API_PAGE_SIZE, PROPERTY_DATE, PROPERTY_PUBLISHED, PROPERTY_SLUG};
use serde::Serialize;

/// Body of a `databases/{id}/query` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<PropertySort>,
    pub page_size: u32,
}

/// Filter on a single property, e.g.
/// `{"property": "Published", "checkbox": {"equals": true}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Checkbox { equals: bool },
    RichText { equals: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl DatabaseQuery {
    /// Posts whose `Published` checkbox is ticked, newest first.
    pub fn published_posts() -> Self {
        Self {
            filter: Some(PropertyFilter {
                property: PROPERTY_PUBLISHED.to_string(),
                condition: FilterCondition::Checkbox { equals: true },
            }),
            sorts: vec![PropertySort {
                property: PROPERTY_DATE.to_string(),
                direction: SortDirection::Descending,
            }],
            page_size: NOTION_API_PAGE_SIZE,
        }
    }

    /// Rows whose `Slug` equals `slug` exactly.
    pub fn by_slug(slug: &str) -> Self {
        Self {
            filter: Some(PropertyFilter {
                property: PROPERTY_SLUG.to_string(),
                condition: FilterCondition::RichText {
                    equals: slug.to_string(),
                },
            }),
            sorts: Vec::new(),
            page_size: NOTION_API_PAGE_SIZE,
        }
    }
}
