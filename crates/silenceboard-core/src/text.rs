#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((clip_idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let mut out = text[..clip_idx].to_string();
    out.push_str("...");
    out
}

/// Makes free text safe for a single markdown table cell.
#[must_use]
pub fn table_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_break = false;
    for ch in text.chars() {
        if ch == '\r' || ch == '\n' {
            pending_break = true;
            continue;
        }
        if pending_break {
            out.push(' ');
            pending_break = false;
        }
        if ch == '|' {
            out.push_str("\\|");
        } else {
            out.push(ch);
        }
    }
    out
}

/// Wraps `text` in an inline code span whose fence is longer than any
/// backtick run inside it.
#[must_use]
pub fn code_span(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat(longest + 1);
    if longest > 0 && (text.starts_with('`') || text.ends_with('`')) {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}
