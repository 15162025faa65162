use crate::case::apply_case;
use crate::config::CaseOption;
use crate::custom_list::CustomList;
use crate::sanitize::sanitize_component;
use crate::version::format_version;
use chrono::{DateTime, Local};
use rand::Rng;
use thiserror::Error;

const LIST1_FALLBACK: &str = "Item";
const LIST2_FALLBACK: &str = "file";

pub const PLACEHOLDERS: &[(&str, &str)] = &[
    ("{list1}", "Random word from custom list 1"),
    ("{prefix}", "Random prefix from custom list 2"),
    ("{version}", "Version number"),
    ("{counter}", "Sequential counter (001, 002, 003...)"),
    ("{date}", "Current date (YYYY-MM-DD)"),
    ("{time}", "Current time (HH-MM-SS)"),
    ("{datetime}", "Date and time (YYYY-MM-DD_HH-MM-SS)"),
    ("{random}", "Random number (1-1000)"),
    ("{orig_name}", "Original name without extension"),
    ("{orig_ext}", "Original extension including the dot"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Token(Token),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    List1,
    Prefix,
    Version,
    Counter,
    Date,
    Time,
    DateTime,
    Random,
    OrigName,
    OrigExt,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("pattern is empty")]
    Empty,
    #[error("unbalanced braces in pattern")]
    UnbalancedBraces,
    #[error("unknown placeholder: {{{0}}}")]
    UnknownToken(String),
}

#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub counter: u64,
    pub version: f64,
    pub now: DateTime<Local>,
    pub original_stem: &'a str,
    pub original_ext: &'a str,
    pub list1: &'a CustomList,
    pub list2: &'a CustomList,
}

/// Strict check used to warn about typos; rendering itself never fails.
pub fn validate_template(input: &str) -> Result<(), TemplateError> {
    if input.trim().is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                let mut token = String::new();
                let mut found_close = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        found_close = true;
                        break;
                    }
                    if next == '{' {
                        return Err(TemplateError::UnbalancedBraces);
                    }
                    token.push(next);
                }
                if !found_close || token.is_empty() {
                    return Err(TemplateError::UnbalancedBraces);
                }
                if parse_token(&token).is_none() {
                    return Err(TemplateError::UnknownToken(token));
                }
            }
            '}' => return Err(TemplateError::UnbalancedBraces),
            _ => {}
        }
    }

    Ok(())
}

/// Splits a pattern into literals and placeholders. Unknown `{names}` and stray
/// braces stay in the output verbatim.
pub fn parse_template(input: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}');
        let reopen = after.find('{');
        match close {
            Some(close) if reopen.map_or(true, |reopen| close < reopen) => {
                let name = &after[..close];
                match parse_token(name) {
                    Some(token) => {
                        if !literal.is_empty() {
                            parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                        }
                        parts.push(TemplatePart::Token(token));
                    }
                    None => {
                        literal.push('{');
                        literal.push_str(name);
                        literal.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                literal.push('{');
                rest = after;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    parts
}

pub fn uses_token(parts: &[TemplatePart], token: Token) -> bool {
    parts.contains(&TemplatePart::Token(token))
}

pub fn render_template<R: Rng + ?Sized>(
    parts: &[TemplatePart],
    ctx: &TemplateContext<'_>,
    rng: &mut R,
) -> String {
    let mut output = String::new();
    for part in parts {
        match part {
            TemplatePart::Literal(s) => output.push_str(s),
            TemplatePart::Token(token) => match token {
                Token::List1 => output.push_str(ctx.list1.choose(rng).unwrap_or(LIST1_FALLBACK)),
                Token::Prefix => output.push_str(ctx.list2.choose(rng).unwrap_or(LIST2_FALLBACK)),
                Token::Version => output.push_str(&format_version(ctx.version)),
                Token::Counter => output.push_str(&format!("{:03}", ctx.counter)),
                Token::Date => output.push_str(&ctx.now.format("%Y-%m-%d").to_string()),
                Token::Time => output.push_str(&ctx.now.format("%H-%M-%S").to_string()),
                Token::DateTime => {
                    output.push_str(&ctx.now.format("%Y-%m-%d_%H-%M-%S").to_string())
                }
                Token::Random => output.push_str(&rng.gen_range(1..=1000u32).to_string()),
                Token::OrigName => output.push_str(ctx.original_stem),
                Token::OrigExt => output.push_str(ctx.original_ext),
            },
        }
    }
    output
}

/// Renders the final base name: placeholders, then case, then the original
/// extension for files whose rendered name ended up without one. Path
/// separators coming from list words are flattened to `_`.
pub fn render_name<R: Rng + ?Sized>(
    parts: &[TemplatePart],
    ctx: &TemplateContext<'_>,
    case: CaseOption,
    is_file: bool,
    rng: &mut R,
) -> String {
    let rendered = sanitize_component(&apply_case(&render_template(parts, ctx, rng), case));
    if is_file && split_extension(&rendered).1.is_empty() {
        return format!("{}{}", rendered, ctx.original_ext);
    }
    rendered
}

/// Splits `name` into stem and extension (with its dot). Leading dots belong to
/// the stem, so `.bashrc` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(dot) => name.split_at(leading + dot),
        None => (name, ""),
    }
}

fn parse_token(token: &str) -> Option<Token> {
    match token {
        "list1" => Some(Token::List1),
        "prefix" => Some(Token::Prefix),
        "version" => Some(Token::Version),
        "counter" => Some(Token::Counter),
        "date" => Some(Token::Date),
        "time" => Some(Token::Time),
        "datetime" => Some(Token::DateTime),
        "random" => Some(Token::Random),
        "orig_name" => Some(Token::OrigName),
        "orig_ext" => Some(Token::OrigExt),
        _ => None,
    }
}
