//! Document primitives produced by the translation engine.
//!
//! A [`DocumentModel`] owns its paragraphs, a [`Paragraph`] owns its inline
//! content. Nothing here is shared across documents.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Center,
    End,
    Justify,
}

impl Alignment {
    /// Map a CSS `text-align` value; `None` leaves the default alignment.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Start),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::End),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB`. Anything else is `None`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(byte(0)?, byte(2)?, byte(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// A contiguous span of text with one flat set of character attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
    /// Shading fill behind the text, hex digits without the leading `#`.
    pub highlight: Option<String>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::WebP => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::WebP => "image/webp",
        }
    }
}

/// Fetched image bytes ready to be embedded at their natural size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width_px: u32,
    pub height_px: u32,
    /// Raw `width` value from the image's inline style. Not applied to the
    /// embedded size (see [`InlineImage::width_hint_px`]).
    pub width_hint: Option<String>,
}

impl InlineImage {
    /// The width hint as pixels, e.g. `"396.00px"` → `396.0`.
    ///
    /// Parsed for callers that want it; the serializer ignores it and always
    /// uses the natural dimensions.
    pub fn width_hint_px(&self) -> Option<f32> {
        let raw = self.width_hint.as_deref()?.trim();
        raw.strip_suffix("px").unwrap_or(raw).trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Run(Run),
    Image(InlineImage),
}

/// Block-level unit. Spacing is fixed: no space after, single line spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub content: Vec<Inline>,
}

impl Paragraph {
    pub fn new(alignment: Option<Alignment>) -> Self {
        Paragraph {
            alignment,
            content: Vec::new(),
        }
    }

    pub fn push_run(&mut self, run: Run) {
        self.content.push(Inline::Run(run));
    }

    pub fn push_image(&mut self, image: InlineImage) {
        self.content.push(Inline::Image(image));
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|i| match i {
            Inline::Run(r) => Some(r),
            Inline::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.content.iter().filter_map(|i| match i {
            Inline::Image(img) => Some(img),
            Inline::Run(_) => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentModel {
    pub paragraphs: Vec<Paragraph>,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.paragraphs.iter().flat_map(|p| p.images())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_six_hex_digits() {
        assert_eq!(Rgb::from_hex("#FF0000"), Some(Rgb(255, 0, 0)));
        assert_eq!(Rgb::from_hex("#0a0B0c"), Some(Rgb(10, 11, 12)));
        assert_eq!(Rgb(10, 11, 12).to_hex(), "0A0B0C");
    }

    #[test]
    fn rgb_rejects_short_or_invalid() {
        assert_eq!(Rgb::from_hex("#abc"), None);
        assert_eq!(Rgb::from_hex("#GGHHII"), None);
        assert_eq!(Rgb::from_hex("red"), None);
        assert_eq!(Rgb::from_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn alignment_mapping() {
        assert_eq!(Alignment::from_css("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_css("RIGHT"), Some(Alignment::End));
        assert_eq!(Alignment::from_css("justify"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_css("left"), Some(Alignment::Start));
        assert_eq!(Alignment::from_css("inherit"), None);
    }

    #[test]
    fn width_hint_parses_pixels() {
        let img = InlineImage {
            data: vec![],
            format: ImageFormat::Png,
            width_px: 1,
            height_px: 1,
            width_hint: Some("396.00px".to_string()),
        };
        assert_eq!(img.width_hint_px(), Some(396.0));
    }
}
