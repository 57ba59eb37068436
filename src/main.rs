use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use gdoc_to_docx::package::{write_batch, write_single};
use gdoc_to_docx::source::{convert_bytes, convert_url, scan_folder};
use gdoc_to_docx::{ConvertedDocument, FetchConfig, HttpFetcher};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Google Doc URLs (view-only sharing is enough).
    urls: Vec<String>,

    /// File with one Google Doc URL per line.
    #[arg(long)]
    urls_file: Option<PathBuf>,

    /// Public Google Drive folder; every native Google Doc in it is converted.
    #[arg(long)]
    folder: Option<String>,

    /// Convert a saved HTML export instead of fetching a URL.
    #[arg(long, conflicts_with_all = ["urls", "urls_file", "folder"])]
    html_file: Option<PathBuf>,

    /// Output directory for a single document, or zip path for a batch.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output file name (only used when exactly one document is produced).
    #[arg(long)]
    name: Option<String>,

    /// Timeout for every HTTP request, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[arg(long)]
    user_agent: Option<String>,
}

fn collect_urls(args: &Args, client: &reqwest::blocking::Client) -> Result<Vec<String>> {
    let mut urls: Vec<String> = args.urls.iter().map(|u| u.trim().to_string()).filter(|u| !u.is_empty()).collect();

    if let Some(path) = &args.urls_file {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        urls.extend(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from));
    }

    if let Some(folder) = &args.folder {
        let found = scan_folder(client, folder).with_context(|| format!("scan folder {folder}"))?;
        if found.is_empty() {
            log::warn!("no Google Docs found in {folder} (or the folder is not public)");
        } else {
            log::info!("found {} document(s) in folder", found.len());
        }
        urls.extend(found);
    }

    Ok(urls)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = FetchConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        ..FetchConfig::default()
    };
    if let Some(ua) = &args.user_agent {
        config.user_agent = ua.clone();
    }
    let client = config.client()?;

    let mut results: Vec<ConvertedDocument> = Vec::new();

    if let Some(path) = &args.html_file {
        let html = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        if html.iter().all(u8::is_ascii_whitespace) {
            return Err(anyhow!("empty html"));
        }
        let fetcher = HttpFetcher::new(client.clone());
        results.push(convert_bytes(&path.display().to_string(), &html, &fetcher));
    } else {
        let urls = collect_urls(&args, &client)?;
        if urls.is_empty() {
            bail!("no input: pass Google Doc URLs, --urls-file, --folder or --html-file");
        }
        for (i, url) in urls.iter().enumerate() {
            log::info!("processing ({}/{}): {}", i + 1, urls.len(), url);
            match convert_url(&client, url) {
                Ok(doc) => results.push(doc),
                Err(e) => log::error!("failed to process {url}: {e}"),
            }
        }
    }

    for doc in &results {
        for w in &doc.warnings {
            log::warn!("{}: {}", doc.source_url, w);
        }
    }

    match results.as_slice() {
        [] => bail!("no document could be converted"),
        [doc] => {
            let dir = args.out.clone().unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
            let path = write_single(doc, &dir, args.name.as_deref())?;
            log::info!("wrote {}", path.display());
        }
        docs => {
            if args.name.is_some() {
                log::warn!("--name is ignored for batches");
            }
            let path = args.out.clone().unwrap_or_else(|| PathBuf::from("converted_docs.zip"));
            write_batch(docs, &path).with_context(|| format!("write {}", path.display()))?;
            log::info!("converted {} documents into {}", docs.len(), path.display());
        }
    }
    Ok(())
}
