//! Human-readable document title, independent of body translation.

use crate::dom::{body_or_root, find_all, find_descendant, text_content};
use markup5ever_rcdom::RcDom;

const TITLE_SUFFIX: &str = " - Google Docs";
const MAX_PARAGRAPH_TITLE_CHARS: usize = 50;
pub const FALLBACK_TITLE: &str = "untitled_doc";

/// `<title>` minus the Google Docs suffix, else the first non-empty paragraph
/// (at most 50 characters), else [`FALLBACK_TITLE`].
pub fn extract_title(dom: &RcDom) -> String {
    if let Some(title) = find_descendant(&dom.document, "title") {
        let text = text_content(&title).replace(TITLE_SUFFIX, "");
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    for p in find_all(&body_or_root(dom), "p") {
        let text = text_content(&p);
        let text = text.trim();
        if !text.is_empty() {
            return text.chars().take(MAX_PARAGRAPH_TITLE_CHARS).collect();
        }
    }

    FALLBACK_TITLE.to_string()
}
