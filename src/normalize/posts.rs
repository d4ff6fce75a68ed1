//! Projection of database rows into [`PostSummary`] records.

use super::text::plain_text;
use crate::api::responses::PropertyWire;
use crate::constants::{
    ANONYMOUS_AUTHOR, PROPERTY_AUTHOR, PROPERTY_DATE, PROPERTY_SLUG, PROPERTY_SUMMARY,
    PROPERTY_TAGS, PROPERTY_TITLE, UNTITLED_POST,
};
use crate::error::AppError;
use crate::model::{slugify, PostSummary};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Projects one database row.
///
/// Fails with [`AppError::MalformedItem`] only when the row has no `id` or
/// no `properties` object. Missing or oddly-typed properties fall back to
/// their defaults instead.
pub fn project_post(item: &Value) -> Result<PostSummary, AppError> {
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedItem {
            id: "<unknown>".to_string(),
            reason: "row has no id".to_string(),
        })?;

    let properties = item
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::MalformedItem {
            id: id.to_string(),
            reason: "row has no properties object".to_string(),
        })?;

    let title = read_title(properties)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED_POST.to_string());

    let slug = match read_property(properties, PROPERTY_SLUG) {
        Some(PropertyWire::RichText { rich_text }) => plain_text(&rich_text),
        _ => String::new(),
    };
    let slug = if slug.trim().is_empty() {
        slugify(&title)
    } else {
        slug.trim().to_string()
    };

    let date = match read_property(properties, PROPERTY_DATE) {
        Some(PropertyWire::Date { date: Some(date) }) => date.start,
        _ => String::new(),
    };

    let summary = match read_property(properties, PROPERTY_SUMMARY) {
        Some(PropertyWire::RichText { rich_text }) => plain_text(&rich_text),
        _ => String::new(),
    };

    let tags = match read_property(properties, PROPERTY_TAGS) {
        Some(PropertyWire::MultiSelect { multi_select }) => {
            multi_select.into_iter().map(|tag| tag.name).collect()
        }
        _ => Vec::new(),
    };

    let author = match read_property(properties, PROPERTY_AUTHOR) {
        Some(PropertyWire::Select {
            select: Some(select),
        }) if !select.name.is_empty() => select.name,
        _ => ANONYMOUS_AUTHOR.to_string(),
    };

    Ok(PostSummary {
        id: id.to_string(),
        title,
        slug,
        date,
        summary,
        tags,
        author,
    })
}

/// Decodes a named property, treating undecodable values as absent.
fn read_property(properties: &Map<String, Value>, name: &str) -> Option<PropertyWire> {
    let raw = properties.get(name)?;
    match PropertyWire::deserialize(raw) {
        Ok(property) => Some(property),
        Err(e) => {
            log::debug!("Ignoring undecodable property '{}': {}", name, e);
            None
        }
    }
}

/// Title text from the `Title` property, or from whichever property is the
/// database's title column when it goes by another name.
fn read_title(properties: &Map<String, Value>) -> Option<String> {
    if let Some(PropertyWire::Title { title }) = read_property(properties, PROPERTY_TITLE) {
        return Some(plain_text(&title));
    }

    properties.iter().find_map(|(name, raw)| {
        if raw.get("type").and_then(Value::as_str) != Some("title") {
            return None;
        }
        match read_property(properties, name) {
            Some(PropertyWire::Title { title }) => Some(plain_text(&title)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rich(text: &str) -> Value {
        json!([{ "type": "text", "plain_text": text, "annotations": {} }])
    }

    fn full_row() -> Value {
        json!({
            "object": "page",
            "id": "page-1",
            "properties": {
                "Title": { "id": "title", "type": "title", "title": [
                    { "plain_text": "Hello ", "annotations": { "bold": true } },
                    { "plain_text": "Notion" }
                ]},
                "Slug": { "id": "s", "type": "rich_text", "rich_text": rich("hello-notion") },
                "Date": { "id": "d", "type": "date", "date": { "start": "2024-05-01", "end": null } },
                "Summary": { "id": "m", "type": "rich_text", "rich_text": rich("A first post") },
                "Tags": { "id": "t", "type": "multi_select", "multi_select": [
                    { "id": "1", "name": "rust", "color": "red" },
                    { "id": "2", "name": "notion", "color": "blue" },
                    { "id": "3", "name": "rust", "color": "red" }
                ]},
                "Author": { "id": "a", "type": "select", "select": { "id": "x", "name": "Lan", "color": "gray" } },
                "Published": { "id": "p", "type": "checkbox", "checkbox": true }
            }
        })
    }

    #[test]
    fn projects_every_field() {
        let post = project_post(&full_row()).unwrap();
        assert_eq!(
            post,
            PostSummary {
                id: "page-1".to_string(),
                title: "Hello Notion".to_string(),
                slug: "hello-notion".to_string(),
                date: "2024-05-01".to_string(),
                summary: "A first post".to_string(),
                tags: vec!["rust".to_string(), "notion".to_string(), "rust".to_string()],
                author: "Lan".to_string(),
            }
        );
    }

    #[test]
    fn missing_properties_fall_back_to_defaults() {
        let post = project_post(&json!({ "id": "page-2", "properties": {} })).unwrap();
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.slug, "untitled");
        assert_eq!(post.date, "");
        assert_eq!(post.summary, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.author, "Anonymous");
    }

    #[test]
    fn empty_title_and_null_select_use_sentinels() {
        let post = project_post(&json!({
            "id": "page-3",
            "properties": {
                "Title": { "type": "title", "title": [] },
                "Author": { "type": "select", "select": null },
                "Date": { "type": "date", "date": null }
            }
        }))
        .unwrap();
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.author, "Anonymous");
        assert_eq!(post.date, "");
    }

    #[test]
    fn slug_is_derived_from_title_when_absent() {
        let post = project_post(&json!({
            "id": "page-4",
            "properties": {
                "Title": { "type": "title", "title": rich("Why Rust, Really?") }
            }
        }))
        .unwrap();
        assert_eq!(post.slug, "why-rust-really");
    }

    #[test]
    fn title_column_may_have_another_name() {
        let post = project_post(&json!({
            "id": "page-5",
            "properties": {
                "Name": { "type": "title", "title": rich("Renamed column") }
            }
        }))
        .unwrap();
        assert_eq!(post.title, "Renamed column");
    }

    #[test]
    fn wrongly_typed_property_is_treated_as_absent() {
        let post = project_post(&json!({
            "id": "page-6",
            "properties": {
                "Tags": { "type": "select", "select": { "name": "single" } },
                "Summary": { "type": "rich_text", "rich_text": "not an array" }
            }
        }))
        .unwrap();
        assert!(post.tags.is_empty());
        assert_eq!(post.summary, "");
    }

    #[test]
    fn rows_without_id_or_properties_are_malformed() {
        let no_id = project_post(&json!({ "properties": {} }));
        assert!(matches!(no_id, Err(AppError::MalformedItem { .. })));

        let no_props = project_post(&json!({ "id": "page-7" }));
        match no_props {
            Err(AppError::MalformedItem { id, .. }) => assert_eq!(id, "page-7"),
            other => panic!("Expected MalformedItem, got {:?}", other),
        }
    }
}
