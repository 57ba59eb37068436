//! Fetching and embedding `<img>` references.
//!
//! The translation engine never talks to the network directly: it goes
//! through an [`ImageFetcher`], so tests can hand it a stub.

use crate::dom::attr_get;
use crate::error::FetchError;
use crate::model::{ImageFormat, InlineImage, Paragraph};
use crate::style::parse_style_attr;
use markup5ever_rcdom::Handle;
use std::fmt;
use std::io::Cursor;

/// Synchronous byte retrieval for one image URL.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Blocking HTTP GET; anything but `200 OK` is a failure.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send()?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// A non-fatal problem met while translating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub url: String,
    pub error: FetchError,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to download image {}: {}", self.url, self.error)
    }
}

fn probe(data: &[u8]) -> Result<(ImageFormat, u32, u32), FetchError> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    let format = match reader.format() {
        Some(image::ImageFormat::Png) => ImageFormat::Png,
        Some(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Some(image::ImageFormat::Gif) => ImageFormat::Gif,
        Some(image::ImageFormat::Bmp) => ImageFormat::Bmp,
        Some(image::ImageFormat::Tiff) => ImageFormat::Tiff,
        Some(image::ImageFormat::WebP) => ImageFormat::WebP,
        other => return Err(FetchError::Decode(format!("unsupported format {other:?}"))),
    };
    let (w, h) = reader
        .into_dimensions()
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok((format, w, h))
}

fn load(url: &str, width_hint: Option<String>, fetcher: &dyn ImageFetcher) -> Result<InlineImage, FetchError> {
    let data = fetcher.fetch(url)?;
    let (format, width_px, height_px) = probe(&data)?;
    Ok(InlineImage {
        data,
        format,
        width_px,
        height_px,
        width_hint,
    })
}

/// Fetch the image behind `node` and append it to `paragraph`.
///
/// Failure only drops this image: the reason is pushed onto `warnings` and
/// the caller carries on with the rest of the document.
pub fn embed_image(node: &Handle, fetcher: &dyn ImageFetcher, paragraph: &mut Paragraph, warnings: &mut Vec<Warning>) {
    let Some(src) = attr_get(node, "src").filter(|s| !s.trim().is_empty()) else {
        return;
    };
    let width_hint = parse_style_attr(attr_get(node, "style").as_deref()).remove("width");

    match load(&src, width_hint, fetcher) {
        Ok(img) => {
            log::debug!("embedded {} ({}x{}) from {}", img.format.extension(), img.width_px, img.height_px, src);
            paragraph.push_image(img);
        }
        Err(error) => {
            let warning = Warning { url: src, error };
            log::warn!("{warning}");
            warnings.push(warning);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{png, StubFetcher};
    use super::*;
    use crate::dom::{find_descendant, html5_parse};

    fn img_node(html: &str) -> Handle {
        let dom = html5_parse(html.as_bytes());
        find_descendant(&dom.document, "img").unwrap()
    }

    #[test]
    fn embeds_at_natural_size_and_keeps_width_hint() {
        let node = img_node(r#"<img src="http://img/a.png" style="width: 396.00px; height: 10px">"#);
        let fetcher = StubFetcher::default().with("http://img/a.png", png(4, 3));
        let mut p = Paragraph::new(None);
        let mut warnings = Vec::new();
        embed_image(&node, &fetcher, &mut p, &mut warnings);

        assert!(warnings.is_empty());
        let img = p.images().next().unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        assert_eq!((img.width_px, img.height_px), (4, 3));
        assert_eq!(img.width_hint.as_deref(), Some("396.00px"));
        assert_eq!(img.width_hint_px(), Some(396.0));
    }

    #[test]
    fn http_failure_becomes_warning() {
        let node = img_node(r#"<img src="http://img/missing.png">"#);
        let mut p = Paragraph::new(None);
        let mut warnings = Vec::new();
        embed_image(&node, &StubFetcher::default(), &mut p, &mut warnings);

        assert!(p.content.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].error, FetchError::Status(404));
        assert_eq!(warnings[0].url, "http://img/missing.png");
    }

    #[test]
    fn transport_failure_becomes_warning() {
        let node = img_node(r#"<img src="http://down/a.png">"#);
        let fetcher = |_: &str| -> Result<Vec<u8>, FetchError> { Err(FetchError::Transport("refused".into())) };
        let mut p = Paragraph::new(None);
        let mut warnings = Vec::new();
        embed_image(&node, &fetcher, &mut p, &mut warnings);
        assert!(p.content.is_empty());
        assert!(warnings[0].to_string().contains("refused"));
    }

    #[test]
    fn garbage_bytes_are_skipped() {
        let node = img_node(r#"<img src="http://img/a.png">"#);
        let fetcher = StubFetcher::default().with("http://img/a.png", b"<html>not an image</html>".to_vec());
        let mut p = Paragraph::new(None);
        let mut warnings = Vec::new();
        embed_image(&node, &fetcher, &mut p, &mut warnings);
        assert!(p.content.is_empty());
        assert!(matches!(warnings[0].error, FetchError::Decode(_)));
    }

    #[test]
    fn missing_src_is_silent() {
        let node = img_node(r#"<img alt="x">"#);
        let mut p = Paragraph::new(None);
        let mut warnings = Vec::new();
        embed_image(&node, &StubFetcher::default(), &mut p, &mut warnings);
        assert!(p.content.is_empty());
        assert!(warnings.is_empty());
    }
}
