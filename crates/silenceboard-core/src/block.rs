//! Identity-scoped section replacement inside a shared discussion body.
//!
//! A section written for identity `X` is wrapped as
//!
//! ```text
//! <!-- START_X -->
//! ...rendered block...
//! <!-- END_X -->
//! ```
//!
//! and appended to the body after a single line break. Merging removes every
//! owned span for `X` and appends the fresh section, so the body holds
//! exactly one section per identity while text outside the span (including
//! other identities' sections) is kept byte-for-byte.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarkers {
    pub start: String,
    pub end: String,
}

impl SectionMarkers {
    pub fn for_identity(identity: &str) -> Self {
        Self {
            start: format!("<!-- START_{identity} -->"),
            end: format!("<!-- END_{identity} -->"),
        }
    }
}

/// Byte range of the first owned span, or `None` when no complete pair exists.
///
/// The span covers the line break this tool writes before the start marker
/// (`\n` or a platform-normalized `\r\n`), both markers and everything between
/// them. A start marker at offset zero, or one not preceded by a line break,
/// owns no leading character.
pub fn find_owned_span(body: &str, markers: &SectionMarkers) -> Option<Range<usize>> {
    let start = body.find(&markers.start)?;
    let search_from = start + markers.start.len();
    let end = search_from + body[search_from..].find(&markers.end)?;
    let span_end = end + markers.end.len();
    Some(start - separator_len(&body[..start])..span_end)
}

fn separator_len(before: &str) -> usize {
    if before.ends_with("\r\n") {
        2
    } else if before.ends_with('\n') {
        1
    } else {
        0
    }
}

/// Concatenates the text before and after `span`.
pub fn splice_out(body: &str, span: Range<usize>) -> String {
    let mut out = String::with_capacity(body.len() - span.len());
    out.push_str(&body[..span.start]);
    out.push_str(&body[span.end..]);
    out
}

/// Removes all owned spans for `markers`. Each pass shrinks the body.
pub fn remove_owned_spans(body: &str, markers: &SectionMarkers) -> (String, usize) {
    let mut current = body.to_string();
    let mut removed = 0;
    while let Some(span) = find_owned_span(&current, markers) {
        current = splice_out(&current, span);
        removed += 1;
    }
    (current, removed)
}

pub fn wrap_section(markers: &SectionMarkers, rendered: &str) -> String {
    format!("{}\n{rendered}\n{}", markers.start, markers.end)
}

/// Replaces the section owned by `identity` with `rendered`.
pub fn merge_section(body: &str, identity: &str, rendered: &str) -> String {
    let markers = SectionMarkers::for_identity(identity);
    let (mut merged, removed) = remove_owned_spans(body, &markers);
    if removed > 1 {
        tracing::warn!(identity, removed, "collapsed duplicated sections");
    }
    if !merged.is_empty() {
        merged.push('\n');
    }
    merged.push_str(&wrap_section(&markers, rendered));
    merged
}
