use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use probe_core::{validate_template, EndpointConfig, Task, TemplateError};

/// On-disk catalog document: category names mapped to endpoint entries.
/// Read once at startup, never written back.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub engines: BTreeMap<String, Vec<CatalogEntry>>,
}

/// One endpoint record as it appears in the catalog JSON. Fields the
/// validator does not use (icons, display flags) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub proxy: bool,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog not readable at {path}: {source}")]
    Unreadable { path: String, source: io::Error },
    #[error("catalog is not valid json: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("category '{category}': {source}")]
    InvalidEndpoint {
        category: String,
        source: TemplateError,
    },
    #[error("no catalog categories match the requested filter {requested:?}")]
    NoMatchingCategories { requested: Vec<String> },
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = fs_read(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn fs_read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Unreadable {
        path: path.display().to_string(),
        source,
    })
}

/// Build the task list for a run, restricted to `categories` when the
/// filter is non-empty. Endpoint templates are validated here so
/// configuration problems surface before any worker starts.
pub fn build_tasks(catalog: &Catalog, categories: &[String]) -> Result<Vec<Task>, CatalogError> {
    let selected: Vec<(&String, &Vec<CatalogEntry>)> = if categories.is_empty() {
        catalog.engines.iter().collect()
    } else {
        let picked: Vec<_> = catalog
            .engines
            .iter()
            .filter(|(category, _)| categories.iter().any(|wanted| wanted == *category))
            .collect();
        if picked.is_empty() {
            return Err(CatalogError::NoMatchingCategories {
                requested: categories.to_vec(),
            });
        }
        picked
    };

    let mut tasks = Vec::new();
    for (category, entries) in selected {
        for entry in entries {
            validate_template(&entry.name, &entry.url).map_err(|source| {
                CatalogError::InvalidEndpoint {
                    category: category.clone(),
                    source,
                }
            })?;
            tasks.push(Task {
                category: category.clone(),
                config: EndpointConfig {
                    name: entry.name.clone(),
                    url_template: entry.url.clone(),
                    use_proxy: entry.proxy,
                },
            });
        }
    }
    Ok(tasks)
}
