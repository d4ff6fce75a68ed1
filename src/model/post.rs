use crate::constants::{ANONYMOUS_AUTHOR, UNTITLED_POST};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A published blog post as listed from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    /// Lookup key for the post; assumed unique among published posts.
    pub slug: String,
    /// ISO-8601 date as stored remotely, empty when the post has none.
    pub date: String,
    pub summary: String,
    /// Remote order, duplicates kept.
    pub tags: Vec<String>,
    pub author: String,
}

impl PostSummary {
    /// Starts a summary with every optional field at its default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNTITLED_POST.to_string(),
            slug: slugify(UNTITLED_POST),
            date: String::new(),
            summary: String::new(),
            tags: Vec::new(),
            author: ANONYMOUS_AUTHOR.to_string(),
        }
    }

    /// Calendar date of publication, if the stored date parses.
    ///
    /// Date-times are accepted too; only the date part is kept.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date_part = self.date.get(..10)?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// Derives a URL slug from a title.
///
/// Letters and digits are lowercased and kept, runs of whitespace, `-` and
/// `_` become a single `-`, and other punctuation is dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Sorts posts newest first. Undated posts sink to the bottom; the sort is
/// stable so equal dates keep the order the server returned.
pub fn sort_posts_by_date_desc(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| match (a.published_on(), b.published_on()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dated(id: &str, date: &str) -> PostSummary {
        PostSummary {
            date: date.to_string(),
            ..PostSummary::new(id)
        }
    }

    #[test]
    fn defaults_use_sentinels() {
        let post = PostSummary::new("p1");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.slug, "untitled");
        assert_eq!(post.author, "Anonymous");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust -- and   Notion_API "), "rust-and-notion-api");
        assert_eq!(slugify("Xin chào"), "xin-chào");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn published_on_accepts_dates_and_datetimes() {
        assert_eq!(
            dated("a", "2024-03-01").published_on(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            dated("b", "2024-03-01T10:00:00.000+07:00").published_on(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(dated("c", "").published_on(), None);
        assert_eq!(dated("d", "soon").published_on(), None);
    }

    #[test]
    fn sorting_is_newest_first_with_undated_last() {
        let mut posts = vec![
            dated("old", "2023-01-01"),
            dated("undated", ""),
            dated("new", "2024-06-01"),
            dated("same-a", "2023-05-05"),
            dated("same-b", "2023-05-05"),
        ];
        sort_posts_by_date_desc(&mut posts);
        let order: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["new", "same-a", "same-b", "old", "undated"]);
    }
}
