//! HTML5 Parser
//!
//! Uses html5ever's built-in RcDom and converts to glide-dom trees.
//! This is simpler and more reliable than implementing TreeSink directly.

use glide_dom::{Document, ElementData, NodeData, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse an HTML string into a Document.
pub fn parse(html: &str) -> Document {
    tracing::debug!(bytes = html.len(), "parsing HTML document");

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .expect("reading from an in-memory string is infallible");

    let mut doc = Document::new();
    convert_node(&dom.document, &mut doc, NodeId::ROOT);

    tracing::debug!(nodes = doc.len(), "parsed document");
    doc
}

/// Parse `html` as a fragment and replace the children of `parent` with it.
///
/// html5ever wraps bare markup in a full html/head/body scaffold; the body's
/// children are the fragment content and get adopted under `parent`.
pub fn parse_fragment_into(doc: &mut Document, parent: NodeId, html: &str) {
    let fragment = parse(html);
    doc.clear_children(parent);

    let Some(body) = fragment
        .elements_by_tag(fragment.root(), "body")
        .into_iter()
        .next()
    else {
        return;
    };
    for &child in fragment.children(body) {
        doc.adopt_from(&fragment, child, parent);
    }
}

/// Convert an RcDom node into the glide-dom arena.
fn convert_node(handle: &Handle, doc: &mut Document, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            // Document node - just process children
            for child in handle.children.borrow().iter() {
                convert_node(child, doc, parent);
            }
        }
        RcNodeData::Doctype { name, .. } => {
            let id = doc.create(NodeData::Doctype {
                name: name.to_string(),
            });
            doc.append_child(parent, id);
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = doc.create_text(&text);
                doc.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = doc.create(NodeData::Comment(contents.to_string()));
            doc.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let mut el = ElementData::new(name.local.as_ref());
            for attr in attrs.borrow().iter() {
                el.set_attr(attr.name.local.as_ref(), &attr.value);
            }
            let id = doc.create(NodeData::Element(el));
            doc.append_child(parent, id);

            for child in handle.children.borrow().iter() {
                convert_node(child, doc, id);
            }
        }
        RcNodeData::ProcessingInstruction { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_structure() {
        let html = r#"<!DOCTYPE html>
            <html>
            <head><title>Test Page</title></head>
            <body><div id="main-content"><p>Hello</p></div></body>
            </html>"#;

        let doc = parse(html);
        assert_eq!(doc.title(), Some("Test Page".to_string()));

        let main = doc.element_by_id("main-content").unwrap();
        assert_eq!(doc.text_content(main), "Hello");
    }

    #[test]
    fn test_whitespace_only_text_skipped() {
        let doc = parse("<div id=\"x\">   </div>");
        let x = doc.element_by_id("x").unwrap();
        assert!(doc.children(x).is_empty());
    }
}
