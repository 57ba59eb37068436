//! Paragraph-by-paragraph assembly of a [`DocumentModel`].

use crate::dom::{attr_get, body_or_root, find_all, find_descendant, html5_parse, text_content};
use crate::image::{ImageFetcher, Warning};
use crate::model::{Alignment, DocumentModel, Paragraph};
use crate::style::parse_style_attr;
use crate::translate::Translator;
use markup5ever_rcdom::{Handle, RcDom};

/// Result of translating one HTML document.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub document: DocumentModel,
    /// Images that were skipped; the document is complete otherwise.
    pub warnings: Vec<Warning>,
}

/// Translate an HTML byte buffer into a document model.
///
/// Never fails: malformed markup, missing `<body>` or missing paragraphs all
/// degrade to fewer (possibly zero) paragraphs.
pub fn convert_html(html: &[u8], fetcher: &dyn ImageFetcher) -> Conversion {
    let dom = html5_parse(html);
    assemble(&dom, fetcher)
}

pub fn assemble(dom: &RcDom, fetcher: &dyn ImageFetcher) -> Conversion {
    let mut out = Conversion::default();
    let body = body_or_root(dom);

    for (i, p) in find_all(&body, "p").iter().enumerate() {
        if let Some(paragraph) = assemble_paragraph(p, fetcher, &mut out.warnings) {
            log::debug!("paragraph {i}: {} inline item(s)", paragraph.content.len());
            out.document.paragraphs.push(paragraph);
        }
    }
    out
}

fn assemble_paragraph(p: &Handle, fetcher: &dyn ImageFetcher, warnings: &mut Vec<Warning>) -> Option<Paragraph> {
    if text_content(p).trim().is_empty() && find_descendant(p, "img").is_none() {
        return None;
    }

    let styles = parse_style_attr(attr_get(p, "style").as_deref());
    let alignment = styles.get("text-align").and_then(|v| Alignment::from_css(v));
    let mut paragraph = Paragraph::new(alignment);

    let mut translator = Translator::new(fetcher, warnings);
    for child in p.children.borrow().iter() {
        translator.translate(child, &mut paragraph);
    }
    Some(paragraph)
}
