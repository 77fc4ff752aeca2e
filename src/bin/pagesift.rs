//! CLI that extracts one page (and its attachments) and prints the result as
//! JSON to stdout.
//!
//! Usage: `pagesift <url> [base_url] [site_identifier]`
//!
//! `base_url` defaults to the page's origin and `site_identifier` to one
//! derived from the host. Configuration comes from `PAGESIFT_*` environment
//! variables; log verbosity from `RUST_LOG` (default `info`).

use std::process::ExitCode;

use rs_pagesift::{site_identifier_from_url, Options, PageExtractor, SessionGuard};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("Usage: pagesift <url> [base_url] [site_identifier]");
        return ExitCode::from(2);
    };
    let base_url = args.next().unwrap_or_else(|| match url::Url::parse(&url) {
        Ok(parsed) => format!("{}/", parsed.origin().ascii_serialization()),
        Err(_) => url.clone(),
    });
    let site = args.next().unwrap_or_else(|| site_identifier_from_url(&url));

    let extractor = match PageExtractor::new(Options::from_env()) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Failed to create HTTP session: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = SessionGuard::new(extractor.session().clone());

    let Some(result) = extractor.extract(&url, &base_url, &site).await else {
        eprintln!("No content extracted from {url}");
        return ExitCode::FAILURE;
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize result: {e}");
            ExitCode::FAILURE
        }
    }
}
