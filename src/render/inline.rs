//! Inline text composition: annotation flags to nested formatting wrappers.

use super::node::Node;
use crate::types::{AnnotationSet, RichText};

/// Wraps `text` in one element per active annotation flag.
///
/// Flags from every set in `annotations` are combined, and wrappers nest as
/// bold > italic > strikethrough > underline > code, bold outermost. The
/// order is fixed, not taken from the input. With no active flag the bare
/// text node is returned.
pub fn compose_text(text: &str, annotations: &[AnnotationSet]) -> Node {
    let combined = annotations
        .iter()
        .fold(AnnotationSet::PLAIN, |acc, set| acc.union(set));

    // innermost first
    let layers = [
        (combined.code, "code"),
        (combined.underline, "u"),
        (combined.strikethrough, "del"),
        (combined.italic, "em"),
        (combined.bold, "strong"),
    ];

    layers
        .into_iter()
        .filter(|(active, _)| *active)
        .fold(Node::text(text), |inner, (_, tag)| {
            Node::element(tag).child(inner).into()
        })
}

/// One composed node per non-empty run, each with its own formatting.
pub fn compose_runs(content: &RichText) -> Vec<Node> {
    content
        .runs()
        .iter()
        .filter(|run| !run.text.is_empty())
        .map(|run| compose_text(&run.text, std::slice::from_ref(&run.annotations)))
        .collect()
}

/// The whole text under the primary run's formatting, or nothing when empty.
pub fn compose_primary(content: &RichText) -> Vec<Node> {
    if content.is_empty() {
        return Vec::new();
    }
    vec![compose_text(
        &content.text(),
        &[content.primary_annotations()],
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextRun;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_unwrapped() {
        assert_eq!(compose_text("x", &[]), Node::text("x"));
        assert_eq!(compose_text("x", &[AnnotationSet::PLAIN]), Node::text("x"));
    }

    #[test]
    fn italic_nests_inside_bold() {
        let node = compose_text(
            "x",
            &[AnnotationSet {
                italic: true,
                bold: true,
                ..Default::default()
            }],
        );
        assert_eq!(node.to_html(), "<strong><em>x</em></strong>");
    }

    #[test]
    fn order_is_fixed_regardless_of_set_order() {
        let code = AnnotationSet {
            code: true,
            ..Default::default()
        };
        let strike = AnnotationSet {
            strikethrough: true,
            underline: true,
            ..Default::default()
        };
        let forward = compose_text("y", &[code, strike]);
        let backward = compose_text("y", &[strike, code]);
        assert_eq!(forward, backward);
        assert_eq!(forward.to_html(), "<del><u><code>y</code></u></del>");
    }

    #[test]
    fn every_flag_wraps_once() {
        let all = AnnotationSet {
            bold: true,
            italic: true,
            strikethrough: true,
            underline: true,
            code: true,
        };
        assert_eq!(
            compose_text("z", &[all, all]).to_html(),
            "<strong><em><del><u><code>z</code></u></del></em></strong>"
        );
    }

    #[test]
    fn runs_are_formatted_independently() {
        let content = RichText::new(vec![
            TextRun::plain("a "),
            TextRun::styled(
                "b",
                AnnotationSet {
                    bold: true,
                    ..Default::default()
                },
            ),
            TextRun::plain(""),
        ]);
        let html: Vec<String> = compose_runs(&content).iter().map(Node::to_html).collect();
        assert_eq!(html, vec!["a ", "<strong>b</strong>"]);
    }

    #[test]
    fn primary_formatting_covers_the_whole_text() {
        let content = RichText::collapsed(vec![
            TextRun::styled(
                "One ",
                AnnotationSet {
                    underline: true,
                    ..Default::default()
                },
            ),
            TextRun::plain("two"),
        ]);
        let nodes = compose_primary(&content);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].to_html(), "<u>One two</u>");
        assert!(compose_primary(&RichText::default()).is_empty());
    }
}
