//! Best-effort cleanup of model text before JSON parsing.
//!
//! Purely textual: nothing here checks meaning, and nothing here fails.
//! Output that is still broken is left for the parser and the schema
//! validator to reject.

use std::sync::LazyLock;

use regex::Regex;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("valid regex"));

static UNQUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_$][A-Za-z0-9_$-]*)(\s*:)").expect("valid regex")
});

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("valid regex"));

/// Reduce raw model output to a JSON object candidate.
///
/// Strips code fences and surrounding prose, keeping the outermost `{...}`
/// span. If that span does not parse as-is, single-quoted strings,
/// unquoted keys and trailing commas are repaired. Input without a `{` is
/// returned trimmed and otherwise untouched.
pub fn sanitize(raw: &str) -> String {
    let unfenced = strip_code_fence(raw);

    let Some(span) = outermost_object(unfenced) else {
        return unfenced.trim().to_string();
    };

    if serde_json::from_str::<serde_json::Value>(span).is_ok() {
        return span.to_string();
    }

    repair(span)
}

/// Body of the first fenced block that contains an object, or the input.
fn strip_code_fence(raw: &str) -> &str {
    CODE_FENCE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|body| body.as_str())
        .find(|body| body.contains('{'))
        .unwrap_or(raw)
}

/// From the first `{` to the last `}`. An unclosed object runs to the end.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    match text.rfind('}') {
        Some(end) if end > start => Some(&text[start..=end]),
        _ => Some(&text[start..]),
    }
}

/// Repairs applied outside string literals only. Double-quoted literals
/// are copied through verbatim; single-quoted ones are re-quoted.
fn repair(span: &str) -> String {
    let mut out = String::with_capacity(span.len() + 16);
    let mut rest = span;

    while let Some(start) = rest.find(['"', '\'']) {
        let (bare, literal) = rest.split_at(start);
        out.push_str(&repair_bare(bare));

        let quote = if literal.starts_with('"') { '"' } else { '\'' };
        let end = closing_quote(literal, quote);
        let body = match end {
            Some(end) => &literal[1..end],
            None => &literal[1..],
        };

        out.push('"');
        if quote == '"' {
            out.push_str(body);
        } else {
            out.push_str(&body.replace("\\'", "'").replace('"', "\\\""));
        }
        match end {
            Some(end) => {
                out.push('"');
                rest = &literal[end + 1..];
            }
            // Unterminated literal: leave it open for the parser to reject.
            None => rest = "",
        }
    }

    out.push_str(&repair_bare(rest));
    out
}

/// Byte offset of the quote closing the literal that opens `literal`.
fn closing_quote(literal: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in literal.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(i);
        }
    }
    None
}

fn repair_bare(text: &str) -> String {
    let keyed = UNQUOTED_KEY.replace_all(text, "${1}\"${2}\"${3}");
    TRAILING_COMMA.replace_all(&keyed, "${1}").into_owned()
}
