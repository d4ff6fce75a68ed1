// tests/common/mod.rs
//! In-memory document store backed by recorded API responses.

#![allow(dead_code)]

use notion_blog::api::FilterCondition;
use notion_blog::{AppError, DatabaseId, DatabaseQuery, DocumentStore, NotionErrorCode, PageId};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const BLOG_DATABASE: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";
pub const HELLO_WORLD_PAGE: &str = "1b7f3c2a-9d4e-4f60-a1b2-c3d4e5f60718";

pub fn fixture(name: &str) -> Value {
    let path = format!(
        "{}/tests/fixtures/api_responses/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

fn results(response: Value) -> Vec<Value> {
    match response {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => panic!("fixture has no results array"),
        },
        _ => panic!("fixture is not an object"),
    }
}

pub fn blog_database() -> DatabaseId {
    DatabaseId::parse(BLOG_DATABASE).unwrap()
}

/// Answers queries the way the hosted store would for the fixture data.
#[derive(Default)]
pub struct FixtureStore {
    rows: Vec<Value>,
    children: HashMap<String, Vec<Value>>,
    failing_pages: HashSet<String>,
    fail_queries: bool,
    pub query_calls: AtomicUsize,
    pub children_calls: AtomicUsize,
    pub requested_pages: Mutex<Vec<String>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blog rows plus the body of the "Hello World" post.
    pub fn blog() -> Self {
        Self::new()
            .with_rows(results(fixture("database_blog_posts.json")))
            .with_children(
                HELLO_WORLD_PAGE,
                results(fixture("blocks_hello_world.json")),
            )
    }

    pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_children(mut self, page: &str, blocks: Vec<Value>) -> Self {
        self.children.insert(page.to_string(), blocks);
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn failing_page(mut self, page: &str) -> Self {
        self.failing_pages.insert(page.to_string());
        self
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn children_requests(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }
}

fn service_unavailable() -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ServiceUnavailable,
        message: "Notion is unavailable".to_string(),
        status: 503,
    }
}

fn property_text(row: &Value, name: &str) -> String {
    row["properties"][name]["rich_text"]
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run["plain_text"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl DocumentStore for FixtureStore {
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<Value>, AppError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(database.as_str(), BLOG_DATABASE);
        if self.fail_queries {
            return Err(service_unavailable());
        }

        let Some(filter) = &query.filter else {
            return Ok(self.rows.clone());
        };
        // rows without properties are passed through so the caller sees them
        let matches = |row: &&Value| row.get("properties").is_none() || match &filter.condition {
            FilterCondition::Checkbox { equals } => {
                row["properties"][filter.property.as_str()]["checkbox"].as_bool() == Some(*equals)
            }
            FilterCondition::RichText { equals } => {
                property_text(row, &filter.property) == *equals
            }
        };
        Ok(self.rows.iter().filter(matches).cloned().collect())
    }

    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Value>, AppError> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested_pages.lock() {
            requested.push(parent.as_str().to_string());
        }
        if self.failing_pages.contains(parent.as_str()) {
            return Err(service_unavailable());
        }
        Ok(self
            .children
            .get(parent.as_str())
            .cloned()
            .unwrap_or_default())
    }
}
