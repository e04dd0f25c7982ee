//! HTML Serialization
//!
//! Turns a subtree back into markup. Text and attribute values are escaped;
//! void elements are emitted without closing tags.

use crate::document::Document;
use crate::node::{NodeData, NodeId};

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Serialize the children of `id`.
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(id) {
        write_node(doc, child, &mut out);
    }
    out
}

/// Serialize `id` itself, including its tag.
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.node(id).data {
        NodeData::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in el.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_and_outer_html() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.element_mut(div).unwrap().set_attr("id", "main-content");
        doc.append_child(doc.root(), div);
        let p = doc.create_element("p");
        doc.append_child(div, p);
        let text = doc.create_text("Home");
        doc.append_child(p, text);

        assert_eq!(inner_html(&doc, div), "<p>Home</p>");
        assert_eq!(
            outer_html(&doc, div),
            r#"<div id="main-content"><p>Home</p></div>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let mut doc = Document::new();
        let img = doc.create_element("img");
        doc.element_mut(img).unwrap().set_attr("data-src", "/hero.jpg");
        doc.append_child(doc.root(), img);

        assert_eq!(outer_html(&doc, img), r#"<img data-src="/hero.jpg">"#);
    }

    #[test]
    fn test_text_escaping() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_child(doc.root(), p);
        let text = doc.create_text("a < b & c > d");
        doc.append_child(p, text);

        assert_eq!(outer_html(&doc, p), "<p>a &lt; b &amp; c &gt; d</p>");
    }

    #[test]
    fn test_attr_escaping() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.element_mut(a).unwrap().set_attr("title", r#"say "hi" & bye"#);
        doc.append_child(doc.root(), a);

        assert_eq!(
            outer_html(&doc, a),
            r#"<a title="say &quot;hi&quot; &amp; bye"></a>"#
        );
    }
}
