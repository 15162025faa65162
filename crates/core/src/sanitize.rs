/// Replaces characters that would turn a rendered name into a path.
pub fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|ch| if is_separator(ch) { '_' } else { ch })
        .collect()
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '/' | '\\' | '\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_underscores() {
        assert_eq!(sanitize_component("a/b\\c"), "a_b_c");
    }

    #[test]
    fn ordinary_names_pass_through() {
        assert_eq!(sanitize_component("Report v1.5 (final).txt"), "Report v1.5 (final).txt");
    }
}
