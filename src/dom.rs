//! html5ever / rcdom helpers shared by the translation passes.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub fn html5_parse(input: &[u8]) -> RcDom {
    let text = String::from_utf8_lossy(input);
    parse_document(RcDom::default(), Default::default()).one(&*text)
}

pub fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn is_tag(node: &Handle, name: &str) -> bool {
    tag_lower(node).is_some_and(|t| t == name)
}

pub fn attr_get(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Concatenation of every descendant text node, untrimmed.
pub fn text_content(node: &Handle) -> String {
    fn walk(node: &Handle, out: &mut String) {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } | NodeData::Document => {
                for c in node.children.borrow().iter() {
                    walk(c, out);
                }
            }
            _ => {}
        }
    }
    let mut out = String::new();
    walk(node, &mut out);
    out
}

/// First element named `name` in document order, excluding `node` itself.
pub fn find_descendant(node: &Handle, name: &str) -> Option<Handle> {
    for c in node.children.borrow().iter() {
        if is_tag(c, name) {
            return Some(c.clone());
        }
        if let Some(found) = find_descendant(c, name) {
            return Some(found);
        }
    }
    None
}

/// Every element named `name` under `node`, in document order.
pub fn find_all(node: &Handle, name: &str) -> Vec<Handle> {
    fn walk(node: &Handle, name: &str, out: &mut Vec<Handle>) {
        for c in node.children.borrow().iter() {
            if is_tag(c, name) {
                out.push(c.clone());
            }
            walk(c, name, out);
        }
    }
    let mut out = Vec::new();
    walk(node, name, &mut out);
    out
}

/// The `<body>` element, or the document root when the parse has none.
pub fn body_or_root(dom: &RcDom) -> Handle {
    find_descendant(&dom.document, "body").unwrap_or_else(|| dom.document.clone())
}
