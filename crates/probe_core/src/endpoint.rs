use std::fmt;

use url::Url;

/// Placeholder replaced by a candidate keyword when resolving a template.
pub const KEYWORD_PLACEHOLDER: &str = "%s";

/// One catalogued search endpoint. Owned by the catalog, borrowed
/// read-only by the validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub name: String,
    pub url_template: String,
    pub use_proxy: bool,
}

/// Unit of work: one endpoint under one catalog category. Created once per
/// run and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub category: String,
    pub config: EndpointConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    MissingPlaceholder { name: String },
    InvalidUrl { name: String, message: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingPlaceholder { name } => {
                write!(f, "url template for '{name}' has no {KEYWORD_PLACEHOLDER} placeholder")
            }
            TemplateError::InvalidUrl { name, message } => {
                write!(f, "url template for '{name}' does not resolve to a valid url: {message}")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Substitute `keyword` into the template's placeholder.
pub fn resolve_template(template: &str, keyword: &str) -> String {
    template.replace(KEYWORD_PLACEHOLDER, keyword)
}

/// Check that a template carries the placeholder and resolves to a URL.
///
/// Run against every catalog entry before workers start, so template
/// problems are configuration errors rather than mid-run surprises.
pub fn validate_template(name: &str, template: &str) -> Result<(), TemplateError> {
    if !template.contains(KEYWORD_PLACEHOLDER) {
        return Err(TemplateError::MissingPlaceholder {
            name: name.to_string(),
        });
    }
    let sample = resolve_template(template, "probe");
    Url::parse(&sample).map_err(|err| TemplateError::InvalidUrl {
        name: name.to_string(),
        message: err.to_string(),
    })?;
    Ok(())
}
