use std::io;
use std::path::Path;
use std::time::Duration;

use url::Url;

use probe_core::KEYWORD_PLACEHOLDER;
use probe_logging::{probe_info, probe_warn};

use crate::catalog::Catalog;
use crate::filename::icon_filename;

const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";
const ICON_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("icons directory not writable: {0}")]
    Io(#[from] io::Error),
}

/// Counts for one icon-fetch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconReport {
    pub attempted: usize,
    pub written: usize,
}

/// Favicon-service URL for an endpoint URL template. The keyword
/// placeholder is stripped before parsing so templates with `%s` in the
/// path or query still yield their host.
pub fn favicon_url(url_template: &str) -> Option<String> {
    let cleaned = url_template.replace(KEYWORD_PLACEHOLDER, "");
    let parsed = Url::parse(&cleaned).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_ENDPOINT}?domain={host}&sz=64"))
}

/// Download one favicon per catalog entry into `icons_dir`. Entries whose
/// icon cannot be fetched are logged and skipped; only an unusable icons
/// directory aborts the pass.
pub async fn download_icons(catalog: &Catalog, icons_dir: &Path) -> Result<IconReport, IconError> {
    std::fs::create_dir_all(icons_dir)?;

    let client = reqwest::Client::builder()
        .timeout(ICON_FETCH_TIMEOUT)
        .build()
        .map_err(|err| IconError::Client(err.to_string()))?;

    let mut report = IconReport::default();
    for (category, entries) in &catalog.engines {
        probe_info!("fetching icons for category '{category}'");
        for entry in entries {
            let Some(url) = favicon_url(&entry.url) else {
                probe_warn!("{}: cannot extract a host from its template", entry.name);
                continue;
            };
            report.attempted += 1;

            match client.get(&url).send().await {
                Ok(response) if response.status().as_u16() == 200 => {
                    match response.bytes().await {
                        Ok(bytes) => {
                            let target = icons_dir.join(icon_filename(&entry.name));
                            match std::fs::write(&target, &bytes) {
                                Ok(()) => report.written += 1,
                                Err(err) => {
                                    probe_warn!("{}: icon write failed: {}", entry.name, err)
                                }
                            }
                        }
                        Err(err) => probe_warn!("{}: icon body unreadable: {}", entry.name, err),
                    }
                }
                Ok(response) => {
                    probe_warn!("{}: icon fetch HTTP {}", entry.name, response.status())
                }
                Err(err) => probe_warn!("{}: icon fetch failed: {}", entry.name, err),
            }
        }
    }
    Ok(report)
}
