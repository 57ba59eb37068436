//! Retrieval around the engine: Google Docs URLs, page fetch, Drive folders.

use crate::assemble::{assemble, Conversion};
use crate::dom::{attr_get, find_all, html5_parse};
use crate::error::{Error, Result};
use crate::image::{HttpFetcher, ImageFetcher, Warning};
use crate::model::DocumentModel;
use crate::title::extract_title;
use regex::Regex;
use std::collections::BTreeSet;
use std::time::Duration;

const DOCS_BASE: &str = "https://docs.google.com/document/d/";

/// Network settings shared by page and image fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("gdoc_to_docx/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn client(&self) -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(Error::Client)
    }
}

/// One successfully converted source document.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub source_url: String,
    pub title: String,
    pub document: DocumentModel,
    pub warnings: Vec<Warning>,
}

fn doc_id(url: &str) -> Option<&str> {
    let rest = url.split_once("/d/")?.1;
    let id = rest.split('/').next().unwrap_or(rest);
    let id = id.split(['?', '#']).next().unwrap_or(id);
    (!id.is_empty()).then_some(id)
}

/// Point a Google Doc URL at its server-rendered `mobilebasic` view.
///
/// `…/edit…` becomes `…/mobilebasic`; any other URL with `/d/<id>` is
/// rebuilt from the id; URLs already on mobilebasic (or without an id) are
/// returned unchanged.
pub fn normalize_doc_url(url: &str) -> String {
    let url = url.trim();
    if let Some((head, _)) = url.split_once("/edit") {
        return format!("{head}/mobilebasic");
    }
    if url.contains("mobilebasic") {
        return url.to_string();
    }
    match doc_id(url) {
        Some(id) => format!("{DOCS_BASE}{id}/mobilebasic"),
        None => url.to_string(),
    }
}

/// Folder id from `…/folders/<id>` or `…?id=<id>`.
pub fn drive_folder_id(url: &str) -> Result<Option<String>> {
    let path_re = Regex::new(r"folders/([a-zA-Z0-9_-]+)")?;
    let query_re = Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)")?;
    Ok(path_re
        .captures(url)
        .or_else(|| query_re.captures(url))
        .map(|c| c[1].to_string()))
}

/// Native Google Docs linked from a Drive embedded folder view.
///
/// Deduplicated, in first-seen order. Binary files (`/file/d/`) are skipped.
pub fn folder_doc_links(html: &[u8]) -> Vec<String> {
    let dom = html5_parse(html);
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for a in find_all(&dom.document, "a") {
        let Some(href) = attr_get(&a, "href") else { continue };
        let Some((_, rest)) = href.split_once("/document/d/") else { continue };
        let id = rest.split('/').next().unwrap_or(rest);
        let id = id.split(['?', '#']).next().unwrap_or(id);
        if id.is_empty() {
            continue;
        }
        let link = format!("{DOCS_BASE}{id}/edit");
        if seen.insert(link.clone()) {
            out.push(link);
        }
    }
    out
}

/// Blocking GET of a page; non-success statuses are errors.
pub fn fetch_page(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send().map_err(|source| Error::PageFetch {
        url: url.to_string(),
        source,
    })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::PageStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = resp.bytes().map_err(|source| Error::PageFetch {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}

/// Links of every Google Doc in a public Drive folder.
pub fn scan_folder(client: &reqwest::blocking::Client, folder_url: &str) -> Result<Vec<String>> {
    let id = drive_folder_id(folder_url)?.ok_or_else(|| Error::InvalidUrl(folder_url.to_string()))?;
    let url = format!("https://drive.google.com/embeddedfolderview?id={id}");
    log::debug!("scanning folder {id}");
    Ok(folder_doc_links(&fetch_page(client, &url)?))
}

/// Translate already-fetched HTML, extracting the title alongside.
pub fn convert_bytes(source_url: &str, html: &[u8], fetcher: &dyn ImageFetcher) -> ConvertedDocument {
    let dom = html5_parse(html);
    let title = extract_title(&dom);
    let Conversion { document, warnings } = assemble(&dom, fetcher);
    ConvertedDocument {
        source_url: source_url.to_string(),
        title,
        document,
        warnings,
    }
}

/// Fetch one Google Doc and translate it.
pub fn convert_url(client: &reqwest::blocking::Client, url: &str) -> Result<ConvertedDocument> {
    let page_url = normalize_doc_url(url);
    log::debug!("fetching {page_url}");
    let html = fetch_page(client, &page_url)?;
    let fetcher = HttpFetcher::new(client.clone());
    Ok(convert_bytes(url, &html, &fetcher))
}
