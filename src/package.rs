//! Output naming and single-file / zip-batch delivery.

use crate::docx::write_docx;
use crate::error::Result;
use crate::source::ConvertedDocument;
use std::collections::BTreeSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Drop characters that are not allowed in file names on common platforms.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect()
}

/// `name` with exactly one `.docx` extension.
pub fn docx_filename(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".docx") {
        name.to_string()
    } else {
        format!("{name}.docx")
    }
}

/// Make `name` unique within `taken` by appending ` (2)`, ` (3)`, ...
fn dedup_name(name: &str, taken: &mut BTreeSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (name, String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem} ({n}){ext}");
        if taken.insert(candidate.clone()) {
            log::warn!("duplicate file name {name:?}, storing as {candidate:?}");
            return candidate;
        }
        n += 1;
    }
}

/// Write one document into `out_dir`. A custom name overrides the title.
pub fn write_single(doc: &ConvertedDocument, out_dir: &Path, custom_name: Option<&str>) -> Result<PathBuf> {
    let base = match custom_name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name.to_string(),
        None => sanitize_filename(&doc.title),
    };
    let path = out_dir.join(docx_filename(&base));
    fs::write(&path, write_docx(&doc.document, &doc.title)?)?;
    Ok(path)
}

/// Zip every document as `<title>.docx`.
pub fn zip_batch(docs: &[ConvertedDocument]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut taken = BTreeSet::new();

    for doc in docs {
        let name = dedup_name(&docx_filename(&sanitize_filename(&doc.title)), &mut taken);
        zip.start_file(name, opts)?;
        zip.write_all(&write_docx(&doc.document, &doc.title)?)?;
    }

    Ok(zip.finish()?.into_inner())
}

pub fn write_batch(docs: &[ConvertedDocument], zip_path: &Path) -> Result<()> {
    fs::write(zip_path, zip_batch(docs)?)?;
    Ok(())
}
