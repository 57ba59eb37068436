//! Per-node dispatch inside one paragraph.

use crate::dom::{attr_get, find_descendant, tag_lower, text_content};
use crate::image::{embed_image, ImageFetcher, Warning};
use crate::model::{Paragraph, Run};
use crate::run::build_run;
use crate::style::parse_style_attr;
use markup5ever_rcdom::{Handle, NodeData};

/// How a node reached while walking a paragraph is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    StyledSpan,
    Image,
    Other,
    /// Comments, doctypes, processing instructions.
    Ignored,
}

pub fn classify(node: &Handle) -> NodeKind {
    match &node.data {
        NodeData::Text { .. } => NodeKind::Text,
        NodeData::Element { .. } => match tag_lower(node).as_deref() {
            Some("span") => NodeKind::StyledSpan,
            Some("img") => NodeKind::Image,
            _ => NodeKind::Other,
        },
        _ => NodeKind::Ignored,
    }
}

/// Shared state for translating the children of one paragraph.
pub struct Translator<'a> {
    fetcher: &'a dyn ImageFetcher,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> Translator<'a> {
    pub fn new(fetcher: &'a dyn ImageFetcher, warnings: &'a mut Vec<Warning>) -> Self {
        Self { fetcher, warnings }
    }

    pub fn translate(&mut self, node: &Handle, paragraph: &mut Paragraph) {
        match classify(node) {
            NodeKind::Text => {
                let text = raw_text(node);
                if !text.trim().is_empty() {
                    paragraph.push_run(Run::plain(text));
                }
            }
            NodeKind::StyledSpan => {
                // A nested image wins over the span's own text.
                if let Some(img) = find_descendant(node, "img") {
                    self.translate(&img, paragraph);
                    return;
                }
                let styles = parse_style_attr(attr_get(node, "style").as_deref());
                if let Some(run) = build_run(&text_content(node), &styles) {
                    paragraph.push_run(run);
                }
            }
            NodeKind::Image => embed_image(node, self.fetcher, paragraph, self.warnings),
            NodeKind::Other => {
                for child in node.children.borrow().iter() {
                    self.translate(child, paragraph);
                }
            }
            NodeKind::Ignored => {}
        }
    }
}

fn raw_text(node: &Handle) -> String {
    match &node.data {
        NodeData::Text { contents } => contents.borrow().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{find_descendant, html5_parse};
    use crate::image::testing::{png, StubFetcher};
    use crate::model::{Inline, Rgb};

    fn translate_p(html: &str, fetcher: &StubFetcher) -> (Paragraph, Vec<Warning>) {
        let dom = html5_parse(html.as_bytes());
        let p = find_descendant(&dom.document, "p").unwrap();
        let mut out = Paragraph::new(None);
        let mut warnings = Vec::new();
        let mut t = Translator::new(fetcher, &mut warnings);
        for child in p.children.borrow().iter() {
            t.translate(child, &mut out);
        }
        (out, warnings)
    }

    #[test]
    fn classification_order() {
        let dom = html5_parse(b"<p>t<span>s</span><img src=x><b>o</b><!-- c --></p>");
        let p = find_descendant(&dom.document, "p").unwrap();
        let kinds: Vec<NodeKind> = p.children.borrow().iter().map(classify).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Text, NodeKind::StyledSpan, NodeKind::Image, NodeKind::Other, NodeKind::Ignored]
        );
    }

    #[test]
    fn bare_text_is_unstyled_and_whitespace_skipped() {
        let (p, _) = translate_p("<p>hello <span> </span>\n  </p>", &StubFetcher::default());
        let runs: Vec<&Run> = p.runs().collect();
        // "hello " as bare text, " " from the span (span text is kept even if blank)
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], &Run::plain("hello "));
        assert_eq!(runs[1].text, " ");
    }

    #[test]
    fn span_uses_only_its_own_style() {
        let html = r#"<p><span style="font-weight:700">a<span style="font-style:italic">b</span></span><span>c</span></p>"#;
        let (p, _) = translate_p(html, &StubFetcher::default());
        let runs: Vec<&Run> = p.runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "ab");
        assert!(runs[0].bold);
        assert!(!runs[0].italic);
        assert_eq!(runs[1], &Run::plain("c"));
    }

    #[test]
    fn image_in_span_preempts_span_text() {
        let fetcher = StubFetcher::default().with("http://i/1.png", png(2, 2));
        let html = r#"<p><span style="font-weight:700">Caption <img src="http://i/1.png"></span></p>"#;
        let (p, _) = translate_p(html, &fetcher);
        assert_eq!(p.content.len(), 1);
        assert!(matches!(p.content[0], Inline::Image(_)));
    }

    #[test]
    fn failed_image_in_span_emits_nothing() {
        let html = r#"<p><span>Caption <img src="http://i/gone.png"></span></p>"#;
        let (p, warnings) = translate_p(html, &StubFetcher::default());
        assert!(p.content.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn other_tags_recurse_into_children() {
        let html = r##"<p><a href="#"><span style="color:#00FF00">link</span></a> tail</p>"##;
        let (p, _) = translate_p(html, &StubFetcher::default());
        let runs: Vec<&Run> = p.runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "link");
        assert_eq!(runs[0].color, Some(Rgb(0, 255, 0)));
        assert_eq!(runs[1].text, " tail");
    }
}
