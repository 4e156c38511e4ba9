// Release body rendering
// Converts the raw markdown of a release body into HTML with a fixed set of
// pattern substitutions. Fenced code blocks and inline code spans are lifted
// out into placeholders before the emphasis rules run, so their contents are
// never rewritten, and restored at the very end.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// The patterns are fixed literals; compilation cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z0-9_+-]*\n?(.*?)```").unwrap());
#[allow(clippy::unwrap_used)]
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
#[allow(clippy::unwrap_used)]
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,4})\s+(.+)$").unwrap());
#[allow(clippy::unwrap_used)]
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*]\s+(.+)$").unwrap());
#[allow(clippy::unwrap_used)]
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
#[allow(clippy::unwrap_used)]
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
#[allow(clippy::unwrap_used)]
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
#[allow(clippy::unwrap_used)]
static PARAGRAPH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

// Placeholder markers use NUL so no substitution pattern can touch them
const BLOCK_MARK: &str = "\u{0}B";
const INLINE_MARK: &str = "\u{0}I";
const MARK_END: &str = "\u{0}";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a raw release body into HTML markup
pub fn render_release_body(body: &str) -> String {
    let text = body.replace("\r\n", "\n");

    // 1. Lift fenced code blocks out before anything else runs
    let mut code_blocks: Vec<String> = Vec::new();
    let text = FENCED_CODE_RE
        .replace_all(&text, |caps: &Captures| {
            let rendered = format!("<pre><code>{}</code></pre>", escape_html(&caps[1]));
            code_blocks.push(rendered);
            format!("{}{}{}", BLOCK_MARK, code_blocks.len() - 1, MARK_END)
        })
        .into_owned();

    // 2. Escape markup characters in everything that is not code
    let text = escape_html(&text);

    // 3. Lift inline code spans out before the emphasis rules
    let mut code_spans: Vec<String> = Vec::new();
    let text = INLINE_CODE_RE
        .replace_all(&text, |caps: &Captures| {
            code_spans.push(format!("<code>{}</code>", &caps[1]));
            format!("{}{}{}", INLINE_MARK, code_spans.len() - 1, MARK_END)
        })
        .into_owned();

    // 4. Line-level structures, then emphasis, then links
    let text = HEADER_RE
        .replace_all(&text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned();
    let text = BULLET_RE.replace_all(&text, "<li>$1</li>").into_owned();
    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>").into_owned();
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>").into_owned();
    let text = LINK_RE
        .replace_all(&text, r#"<a href="$2">$1</a>"#)
        .into_owned();

    // 5. Group list items and wrap plain runs into paragraphs
    let html = PARAGRAPH_SPLIT_RE
        .split(&text)
        .filter(|block| !block.trim().is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n");

    // 6. Restore code placeholders last
    let html = code_spans
        .iter()
        .enumerate()
        .fold(html, |acc, (i, span)| {
            acc.replace(&format!("{}{}{}", INLINE_MARK, i, MARK_END), span)
        });
    code_blocks
        .iter()
        .enumerate()
        .fold(html, |acc, (i, block)| {
            acc.replace(&format!("{}{}{}", BLOCK_MARK, i, MARK_END), block)
        })
}

/// Render one blank-line-separated block: consecutive `<li>` lines become a
/// single `<ul>`, already-block-level lines pass through, plain runs become
/// paragraphs with `<br />` line breaks.
fn render_block(block: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut list_items: Vec<&str> = Vec::new();
    let mut paragraph_lines: Vec<&str> = Vec::new();

    fn flush_list(out: &mut Vec<String>, items: &mut Vec<&str>) {
        if !items.is_empty() {
            out.push(format!("<ul>\n{}\n</ul>", items.join("\n")));
            items.clear();
        }
    }
    fn flush_paragraph(out: &mut Vec<String>, lines: &mut Vec<&str>) {
        if !lines.is_empty() {
            out.push(format!("<p>{}</p>", lines.join("<br />")));
            lines.clear();
        }
    }

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("<li>") {
            flush_paragraph(&mut out, &mut paragraph_lines);
            list_items.push(trimmed);
        } else if trimmed.starts_with("<h")
            || trimmed.starts_with("<pre>")
            || trimmed.starts_with(BLOCK_MARK)
        {
            flush_paragraph(&mut out, &mut paragraph_lines);
            flush_list(&mut out, &mut list_items);
            out.push(trimmed.to_string());
        } else {
            flush_list(&mut out, &mut list_items);
            paragraph_lines.push(trimmed);
        }
    }
    flush_paragraph(&mut out, &mut paragraph_lines);
    flush_list(&mut out, &mut list_items);

    out.join("\n")
}
