use crate::config::CaseOption;

pub fn apply_case(name: &str, option: CaseOption) -> String {
    match option {
        CaseOption::None => name.to_string(),
        CaseOption::Uppercase => name.to_uppercase(),
        CaseOption::Lowercase => name.to_lowercase(),
        CaseOption::Title => title_case(name),
    }
}

// Words are whitespace-delimited; punctuation inside a word does not start a new one.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for ch in name.chars() {
        if ch.is_whitespace() {
            word_start = true;
            out.push(ch);
        } else if word_start {
            word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_identity() {
        let name = "MiXeD name_01.TXT";
        assert_eq!(apply_case(name, CaseOption::None), name);
    }

    #[test]
    fn uppercase_is_idempotent() {
        let once = apply_case("report_v1.5", CaseOption::Uppercase);
        let twice = apply_case(&once, CaseOption::Uppercase);
        assert_eq!(once, "REPORT_V1.5");
        assert_eq!(once, twice);
    }

    #[test]
    fn lowercase_handles_non_ascii() {
        assert_eq!(apply_case("ÄRGER Datei", CaseOption::Lowercase), "ärger datei");
    }

    #[test]
    fn title_splits_on_whitespace_only() {
        assert_eq!(
            apply_case("hELLO  wORLD my_FILE", CaseOption::Title),
            "Hello  World My_file"
        );
    }
}
