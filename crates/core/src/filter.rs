use regex::RegexBuilder;
use tracing::warn;

/// Returns true when `name` matches any comma-separated sub-pattern of `filter`.
///
/// `*.ext` is a case-insensitive suffix test, other wildcard patterns match from
/// the start of the name without being anchored at the end, and plain names are
/// compared case-insensitively.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() || filter == "*" {
        return true;
    }

    filter
        .split(',')
        .map(str::trim)
        .any(|pattern| matches_pattern(name, pattern))
}

fn matches_pattern(name: &str, pattern: &str) -> bool {
    if pattern.is_empty() || pattern == "*" {
        return true;
    }

    if let Some(ext) = pattern.strip_prefix('*').filter(|rest| rest.starts_with('.')) {
        return name.to_lowercase().ends_with(&ext.to_lowercase());
    }

    if pattern.contains('*') {
        return wildcard_prefix_match(name, pattern);
    }

    name.to_lowercase() == pattern.to_lowercase()
}

fn wildcard_prefix_match(name: &str, pattern: &str) -> bool {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    match RegexBuilder::new(&format!("^(?:{body})"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.is_match(name),
        Err(err) => {
            warn!(pattern, %err, "ignoring unusable filter pattern");
            false
        }
    }
}
