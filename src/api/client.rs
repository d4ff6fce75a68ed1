// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication, the
//! request timeout, and basic request/response operations without
//! any projection logic.

use super::query::DatabaseQuery;
use super::{parser, DocumentStore};
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(api_key: &ApiKey, timeout: Duration) -> Result<Self, AppError> {
        Self::with_base_url(api_key, timeout, NOTION_API_BASE_URL)
    }

    /// Same as [`NotionHttpClient::new`] against a different API root.
    pub fn with_base_url(
        api_key: &ApiKey,
        timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "   Query body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "Failed to serialize".to_string())
            );
        }
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl DocumentStore for NotionHttpClient {
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let response = self.post(&endpoint, query).await?;
        let result = extract_response_text(response).await?;
        log::debug!("Database query response: {}", result.status);
        parser::parse_results(result)
    }

    async fn retrieve_children(
        &self,
        parent: &PageId,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let endpoint = format!(
            "blocks/{}/children?page_size={}",
            parent.to_hyphenated(),
            NOTION_API_PAGE_SIZE
        );
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        parser::parse_results(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
