// src/api/parser.rs
//! Turns raw HTTP responses into result items or typed errors.

use super::client::ApiResponse;
use super::responses::{NotionError, RawResultsResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use serde_json::Value;

/// Parse any Notion API response body, mapping error statuses to `AppError`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error<T>(body: &str, status: reqwest::StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion error {} from {} (request id: {})",
            notion_error.code,
            url,
            notion_error.request_id.as_deref().unwrap_or("none")
        );
        return Err(AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status: notion_error.status,
        });
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status: status.as_u16(),
    })
}

/// Extracts the result items of a list or query response.
///
/// Only the first page is read; a truncated listing is logged.
pub fn parse_results(result: ApiResponse<String>) -> Result<Vec<Value>, AppError> {
    let url = result.url.clone();
    let response: RawResultsResponse = parse_api_response(result)?;
    if response.object != "list" {
        return Err(AppError::MalformedResponse(format!(
            "Expected a list object from {}, got '{}'",
            url, response.object
        )));
    }
    if response.has_more {
        log::warn!(
            "Response from {} has more than {} results; only the first page is used",
            url,
            response.results.len()
        );
    }
    Ok(response.results)
}

fn preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let mut end = ERROR_BODY_PREVIEW_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
