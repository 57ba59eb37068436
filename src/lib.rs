//! Convert publicly viewable Google Docs (their `mobilebasic` HTML export)
//! into `.docx` files, keeping bold/italic/underline, text color, highlight
//! fills, inline images and paragraph alignment.
//!
//! The core is [`convert_html`]: HTML bytes plus an [`ImageFetcher`] in, a
//! [`DocumentModel`] out. Fetching pages, scanning Drive folders and writing
//! files live in [`source`] and [`package`].

pub mod assemble;
pub mod docx;
pub mod dom;
pub mod error;
pub mod image;
pub mod model;
pub mod package;
pub mod run;
pub mod source;
pub mod style;
pub mod title;
pub mod translate;

pub use assemble::{convert_html, Conversion};
pub use docx::write_docx;
pub use error::{Error, FetchError, Result};
pub use image::{HttpFetcher, ImageFetcher, Warning};
pub use model::{Alignment, DocumentModel, Inline, InlineImage, Paragraph, Rgb, Run};
pub use source::{ConvertedDocument, FetchConfig};
pub use style::{parse_style, StyleMap};
pub use title::extract_title;
