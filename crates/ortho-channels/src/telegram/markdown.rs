//! Rebuild Telegram (legacy) Markdown source from plain text plus entities.
//!
//! Only one level of formatting survives: legacy Markdown cannot nest, so an
//! entity that starts inside an earlier one is rendered as plain text.

use super::types::TgEntity;
use ortho_core::text::utf16_span_to_bytes;

/// Render `text` with its `entities` into Markdown the Bot API accepts with
/// `parse_mode = "Markdown"`.
pub(crate) fn render_markdown(text: &str, entities: &[TgEntity]) -> String {
    let mut spans: Vec<(std::ops::Range<usize>, &TgEntity)> = entities
        .iter()
        .filter(|e| is_rendered(&e.kind))
        .filter_map(|e| utf16_span_to_bytes(text, e.offset, e.length).map(|r| (r, e)))
        .filter(|(r, _)| !r.is_empty())
        .collect();
    spans.sort_by_key(|(r, _)| r.start);

    let mut out = String::with_capacity(text.len() + spans.len() * 4);
    let mut pos = 0;
    for (range, entity) in spans {
        if range.start < pos {
            continue;
        }
        out.push_str(&escape(&text[pos..range.start]));
        let inner = &text[range.clone()];
        match entity.kind.as_str() {
            "bold" => wrap(&mut out, "*", inner),
            "italic" => wrap(&mut out, "_", inner),
            "code" => wrap(&mut out, "`", inner),
            "pre" => {
                out.push_str("```");
                if let Some(lang) = &entity.language {
                    out.push_str(lang);
                }
                out.push('\n');
                out.push_str(inner);
                out.push_str("```");
            }
            "text_link" => match &entity.url {
                Some(url) => {
                    out.push('[');
                    out.push_str(inner);
                    out.push_str("](");
                    out.push_str(url);
                    out.push(')');
                }
                None => out.push_str(&escape(inner)),
            },
            _ => out.push_str(&escape(inner)),
        }
        pos = range.end;
    }
    out.push_str(&escape(&text[pos..]));
    out
}

fn is_rendered(kind: &str) -> bool {
    matches!(kind, "bold" | "italic" | "code" | "pre" | "text_link")
}

fn wrap(out: &mut String, delim: &str, inner: &str) {
    out.push_str(delim);
    out.push_str(inner);
    out.push_str(delim);
}

/// Escape the characters legacy Markdown treats as entity delimiters.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
