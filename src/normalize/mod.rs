//! Content normalization: turns document store rows and blocks into the
//! crate's closed set of records.
//!
//! Read paths that feed whole pages (the post listing and a post's blocks)
//! fail open: a remote failure is logged and yields an empty result, since
//! partial content beats a broken page. Looking a post up by slug keeps
//! "no such post" (`Ok(None)`) apart from "the query failed" (`Err`).

mod blocks;
mod cache;
mod posts;
mod text;

pub use blocks::{project_block, project_blocks};
pub use cache::{CacheKey, GenerationCache, Operation};
pub use posts::project_post;

use crate::api::{DatabaseQuery, DocumentStore};
use crate::constants::DEFAULT_FETCH_CONCURRENCY;
use crate::error::AppError;
use crate::model::{sort_posts_by_date_desc, Block, PostSummary};
use crate::types::{DatabaseId, PageId};
use futures::stream::{self, StreamExt};

/// Normalizer bound to one blog database.
///
/// Holds the store by reference; the store handle is built once at start-up
/// and shared by every normalizer.
pub struct ContentNormalizer<'a> {
    store: &'a dyn DocumentStore,
    database_id: DatabaseId,
    cache: Option<&'a GenerationCache>,
    concurrency: usize,
}

impl<'a> ContentNormalizer<'a> {
    pub fn new(store: &'a dyn DocumentStore, database_id: DatabaseId) -> Self {
        Self {
            store,
            database_id,
            cache: None,
            concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    /// Memoizes results in `cache` for the rest of the generation pass.
    pub fn with_cache(mut self, cache: &'a GenerationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Caps how many documents [`Self::get_many_page_blocks`] fetches at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Every published post, newest first.
    ///
    /// Malformed rows are skipped. A failed query yields an empty list.
    pub async fn list_published_posts(&self) -> Vec<PostSummary> {
        if let Some(posts) = self.cache.and_then(GenerationCache::published_posts) {
            return posts;
        }

        let rows = match self
            .store
            .query_database(&self.database_id, &DatabaseQuery::published_posts())
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("Error fetching posts from Notion: {}", e);
                return Vec::new();
            }
        };

        let total = rows.len();
        let mut posts: Vec<PostSummary> = rows.iter().filter_map(project_or_skip).collect();
        sort_posts_by_date_desc(&mut posts);

        log::info!("Listed {} published posts ({} rows)", posts.len(), total);
        if let Some(cache) = self.cache {
            cache.store_published_posts(&posts);
        }
        posts
    }

    /// The post whose slug equals `slug`.
    ///
    /// `Ok(None)` means the query succeeded and nothing matched; `Err` means
    /// the query itself failed. When several rows share a slug the first
    /// one that projects wins.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostSummary>, AppError> {
        if let Some(cached) = self.cache.and_then(|cache| cache.post_by_slug(slug)) {
            return Ok(cached);
        }

        let rows = self
            .store
            .query_database(&self.database_id, &DatabaseQuery::by_slug(slug))
            .await
            .map_err(|e| {
                log::error!("Error fetching post with slug {}: {}", slug, e);
                e
            })?;

        if rows.len() > 1 {
            log::warn!(
                "{} rows share the slug '{}'; using the first",
                rows.len(),
                slug
            );
        }
        let post = match rows.iter().find_map(project_or_skip) {
            Some(post) => Some(post),
            None => self.find_by_derived_slug(slug).await?,
        };
        if post.is_none() {
            log::debug!("No post found for slug '{}'", slug);
        }

        if let Some(cache) = self.cache {
            cache.store_post_by_slug(slug, post.as_ref());
        }
        Ok(post)
    }

    /// Posts without a `Slug` value are listed under a slug derived from
    /// their title, which the remote filter cannot match. Those are found
    /// by scanning the published rows.
    async fn find_by_derived_slug(&self, slug: &str) -> Result<Option<PostSummary>, AppError> {
        let rows = self
            .store
            .query_database(&self.database_id, &DatabaseQuery::published_posts())
            .await?;
        Ok(rows
            .iter()
            .filter_map(project_or_skip)
            .find(|post| post.slug == slug))
    }

    /// A post's direct child blocks in document order.
    ///
    /// Nested children are not fetched. A failed request yields no blocks.
    pub async fn get_page_blocks(&self, page_id: &PageId) -> Vec<Block> {
        self.try_get_page_blocks(page_id)
            .await
            .unwrap_or_else(|e| {
                log::error!(
                    "Error fetching post content with ID {}: {}",
                    page_id.as_str(),
                    e
                );
                Vec::new()
            })
    }

    /// Like [`Self::get_page_blocks`] but surfaces the remote failure.
    pub async fn try_get_page_blocks(&self, page_id: &PageId) -> Result<Vec<Block>, AppError> {
        if let Some(blocks) = self
            .cache
            .and_then(|cache| cache.page_blocks(page_id.as_str()))
        {
            return Ok(blocks);
        }

        let items = self.store.retrieve_children(page_id).await?;
        let blocks = project_blocks(items);
        log::debug!("Fetched {} blocks for {}", blocks.len(), page_id);

        if let Some(cache) = self.cache {
            cache.store_page_blocks(page_id.as_str(), &blocks);
        }
        Ok(blocks)
    }

    /// Blocks of several posts, fetched concurrently, in input order.
    ///
    /// Each post fails open on its own.
    pub async fn get_many_page_blocks(&self, page_ids: &[PageId]) -> Vec<Vec<Block>> {
        stream::iter(page_ids)
            .map(|page_id| self.get_page_blocks(page_id))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

fn project_or_skip(row: &serde_json::Value) -> Option<PostSummary> {
    match project_post(row) {
        Ok(post) => Some(post),
        Err(e) => {
            log::warn!("Skipping row: {}", e);
            None
        }
    }
}
