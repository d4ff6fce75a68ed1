//! Presentation nodes: an HTML-shaped tree the page template embeds.

use std::fmt::Write;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    /// Attributes in insertion order. A `None` value is a boolean attribute.
    pub attributes: Vec<(&'static str, Option<String>)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn element(tag: &'static str) -> Element {
        Element {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// All text beneath this node, markup removed.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Serializes the node as escaped HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Element(element) => element.write_html(out),
        }
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, Some(value.into())));
        self
    }

    pub fn flag(mut self, name: &'static str) -> Self {
        self.attributes.push((name, None));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| *attr == name)
            .and_then(|(_, value)| value.as_deref())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            match value {
                Some(value) => {
                    let _ = write!(
                        out,
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                None => {
                    out.push(' ');
                    out.push_str(name);
                }
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Serializes a node sequence back to back.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Node::element("a")
            .attr("title", "say \"hi\" & <bye>")
            .child(Node::text("1 < 2 & 3"))
            .into();
        assert_eq!(
            node.to_html(),
            "<a title=\"say &quot;hi&quot; &amp; &lt;bye&gt;\">1 &lt; 2 &amp; 3</a>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: Node = Node::element("input")
            .attr("type", "checkbox")
            .flag("disabled")
            .into();
        assert_eq!(node.to_html(), "<input type=\"checkbox\" disabled>");
    }

    #[test]
    fn text_content_strips_markup() {
        let node: Node = Node::element("p")
            .child(Node::text("a "))
            .child(Node::element("strong").child(Node::text("b")))
            .into();
        assert_eq!(node.text_content(), "a b");
        assert_eq!(
            nodes_to_html(&[node.clone(), node]),
            "<p>a <strong>b</strong></p><p>a <strong>b</strong></p>"
        );
    }
}
