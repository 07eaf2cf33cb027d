//! Conversion of post comment markup into plain text.
//!
//! Comments arrive as a small HTML subset: `<br>` line breaks, `<span class="quote">`
//! greentext, `<a class="quotelink">` reply links, `<wbr>` hints and character
//! entities. Only the text survives; line structure is kept.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity regex"));

/// Strips markup from a comment and decodes character entities.
pub fn to_plain_text(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    let without_tags = TAG.replace_all(&with_breaks, "");
    decode_entities(&without_tags)
}

/// Returns the first non-empty line of a comment, cut to `max_chars` characters.
pub fn teaser(html: &str, max_chars: usize) -> String {
    let text = to_plain_text(html);
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; last so "&amp;gt;" decodes to "&gt;" rather than ">"
    numeric
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
