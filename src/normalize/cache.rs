//! Per-generation-pass memoization of normalizer results.
//!
//! A [`GenerationCache`] lives for exactly one generation pass: create it
//! when the pass starts, hand it to every normalizer used during the pass,
//! and drop it at the end. It is never global, so nothing leaks into the
//! next pass.
//!
//! Only results of successful remote calls are stored. A cache hit is
//! therefore always a value a fresh successful call returned; the cache can
//! only reduce the number of remote calls.

use crate::model::{Block, PostSummary};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which normalizer operation produced a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PublishedPosts,
    PostBySlug,
    PageBlocks,
}

/// Cache key: the operation plus its argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: Operation,
    pub argument: String,
}

impl CacheKey {
    pub fn new(operation: Operation, argument: impl Into<String>) -> Self {
        Self {
            operation,
            argument: argument.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Posts(Vec<PostSummary>),
    Post(Option<PostSummary>),
    Blocks(Vec<Block>),
}

/// Concurrent-safe memo table shared by reference within one pass.
#[derive(Debug, Default)]
pub struct GenerationCache {
    entries: DashMap<CacheKey, CachedValue>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_posts(&self) -> Option<Vec<PostSummary>> {
        let key = CacheKey::new(Operation::PublishedPosts, "");
        self.lookup(&key, |value| match value {
            CachedValue::Posts(posts) => Some(posts.clone()),
            _ => None,
        })
    }

    pub fn store_published_posts(&self, posts: &[PostSummary]) {
        self.entries.insert(
            CacheKey::new(Operation::PublishedPosts, ""),
            CachedValue::Posts(posts.to_vec()),
        );
    }

    /// `Some(None)` is a cached "no such post".
    pub fn post_by_slug(&self, slug: &str) -> Option<Option<PostSummary>> {
        let key = CacheKey::new(Operation::PostBySlug, slug);
        self.lookup(&key, |value| match value {
            CachedValue::Post(post) => Some(post.clone()),
            _ => None,
        })
    }

    pub fn store_post_by_slug(&self, slug: &str, post: Option<&PostSummary>) {
        self.entries.insert(
            CacheKey::new(Operation::PostBySlug, slug),
            CachedValue::Post(post.cloned()),
        );
    }

    pub fn page_blocks(&self, page_id: &str) -> Option<Vec<Block>> {
        let key = CacheKey::new(Operation::PageBlocks, page_id);
        self.lookup(&key, |value| match value {
            CachedValue::Blocks(blocks) => Some(blocks.clone()),
            _ => None,
        })
    }

    pub fn store_page_blocks(&self, page_id: &str, blocks: &[Block]) {
        self.entries.insert(
            CacheKey::new(Operation::PageBlocks, page_id),
            CachedValue::Blocks(blocks.to_vec()),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) so far in this pass.
    pub fn stats(&self) -> (usize, usize) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    fn lookup<T>(&self, key: &CacheKey, extract: impl FnOnce(&CachedValue) -> Option<T>) -> Option<T> {
        let found = self.entries.get(key).and_then(|entry| extract(entry.value()));
        let counter = if found.is_some() {
            log::debug!("Cache hit: {:?} {}", key.operation, key.argument);
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }
}
