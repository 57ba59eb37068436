//! End-to-end: HTML export in, WordprocessingML package out.

use gdoc_to_docx::{convert_html, extract_title, write_docx, Alignment, FetchError, Inline, Rgb};
use std::io::{Cursor, Read};

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgba8(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn fetch_ok(url: &str) -> Result<Vec<u8>, FetchError> {
    if url.ends_with("404.png") {
        Err(FetchError::Status(404))
    } else {
        Ok(png(8, 4))
    }
}

fn no_network(_: &str) -> Result<Vec<u8>, FetchError> {
    Err(FetchError::Transport("offline".into()))
}

fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut out = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}

const EXPORT: &str = r#"<!DOCTYPE html>
<html><head><title>Quarterly Report - Google Docs</title></head>
<body>
<div class="doc-content">
  <p style="text-align:center"><span style="font-weight:700;color:#FF0000">Hi</span></p>
  <p style="padding:0"><span style=""></span></p>
  <p><span style="background-color:#FFFF00;font-style:italic">marked</span><span style="text-decoration:underline">under</span></p>
  <p style="text-align:justify"><span style="width:200px"><img src="https://lh3.example/ok.png" style="width: 200.00px; height: 100.00px"></span></p>
  <p><span><img src="https://lh3.example/404.png"></span><span>after image</span></p>
</div>
</body></html>"#;

#[test]
fn export_translates_to_expected_model() {
    let conv = convert_html(EXPORT.as_bytes(), &fetch_ok);
    let paras = &conv.document.paragraphs;
    assert_eq!(paras.len(), 4);

    assert_eq!(paras[0].alignment, Some(Alignment::Center));
    let Inline::Run(hi) = &paras[0].content[0] else { panic!("expected run") };
    assert_eq!(hi.text, "Hi");
    assert!(hi.bold);
    assert_eq!(hi.color, Some(Rgb(255, 0, 0)));

    let runs: Vec<_> = paras[1].runs().collect();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].italic);
    assert_eq!(runs[0].highlight.as_deref(), Some("FFFF00"));
    assert!(runs[1].underline);

    assert_eq!(paras[2].alignment, Some(Alignment::Justify));
    let img = paras[2].images().next().unwrap();
    assert_eq!((img.width_px, img.height_px), (8, 4));
    assert_eq!(img.width_hint_px(), Some(200.0));

    assert_eq!(paras[3].images().count(), 0);
    assert_eq!(paras[3].runs().next().unwrap().text, "after image");
    assert_eq!(conv.warnings.len(), 1);
    assert_eq!(conv.warnings[0].url, "https://lh3.example/404.png");
}

#[test]
fn title_is_independent_of_body() {
    let dom = gdoc_to_docx::dom::html5_parse(EXPORT.as_bytes());
    assert_eq!(extract_title(&dom), "Quarterly Report");
}

#[test]
fn package_carries_formatting_and_media() {
    let conv = convert_html(EXPORT.as_bytes(), &fetch_ok);
    let bytes = write_docx(&conv.document, "Quarterly Report").unwrap();

    let doc = read_part(&bytes, "word/document.xml");
    assert_eq!(doc.matches("<w:p>").count(), 4);
    assert!(doc.contains("<w:jc w:val=\"center\"/>"));
    assert!(doc.contains("<w:b/><w:color w:val=\"FF0000\"/>"));
    assert!(doc.contains("w:fill=\"FFFF00\""));
    assert!(doc.contains("<w:u w:val=\"single\"/>"));
    // natural size, 8x4 px at 9525 EMU/px
    assert!(doc.contains("<wp:extent cx=\"76200\" cy=\"38100\"/>"));

    let rels = read_part(&bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains("Target=\"media/image1.png\""));
    let types = read_part(&bytes, "[Content_Types].xml");
    assert!(types.contains("Extension=\"png\""));
    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly Report</dc:title>"));
}

#[test]
fn offline_conversion_keeps_text() {
    let conv = convert_html(EXPORT.as_bytes(), &no_network);
    assert_eq!(conv.document.paragraphs.len(), 4);
    assert_eq!(conv.document.images().count(), 0);
    assert_eq!(conv.warnings.len(), 2);
    assert!(conv.warnings.iter().all(|w| matches!(w.error, FetchError::Transport(_))));
}

#[test]
fn empty_body_gives_empty_document() {
    let conv = convert_html(b"<html><head><title>x</title></head><body></body></html>", &no_network);
    assert!(conv.document.is_empty());
    let bytes = write_docx(&conv.document, "x").unwrap();
    assert!(!read_part(&bytes, "word/document.xml").contains("<w:p>"));
}
