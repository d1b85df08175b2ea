/// Filesystem-safe snapshot filename for an endpoint display name.
pub fn snapshot_filename(name: &str) -> String {
    format!("{}.html", sanitize_name(name))
}

/// Strip characters that are unsafe in filenames and map spaces to
/// underscores. Falls back to `unnamed` when nothing survives.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| !is_forbidden(*c)).collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return "unnamed".to_string();
    }
    trimmed.replace(' ', "_")
}

/// Icon filename for an endpoint display name: alphanumerics only,
/// lowercased, spaces mapped to underscores.
pub fn icon_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-'))
        .collect();
    let trimmed = cleaned.trim();
    let base = if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.replace(' ', "_").to_lowercase()
    };
    format!("{base}.png")
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|')
}
