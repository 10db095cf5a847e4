//! Rewrites `:name` placeholders into Postgres `$n` positions.
//!
//! The Postgres wire protocol only accepts positional parameters, so named
//! placeholders are rewritten before preparation. Each distinct name gets the
//! next position after the highest `$n` already present, in order of first
//! appearance.
//!
//! Warning: the scanner skips quoted strings, quoted identifiers, comments,
//! dollar-quoted blocks, and `::` casts via a lightweight state machine; it
//! may still miss edge cases in complex SQL (e.g. PL/pgSQL bodies). Prefer
//! `$n` placeholders directly when the SQL is Postgres-specific.

use std::collections::HashMap;
use std::ops::Range;

#[derive(Clone)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'-' && bytes.get(idx + 1) == Some(&b'-')
}

fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'/' && bytes.get(idx + 1) == Some(&b'*')
}

fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'*' && bytes.get(idx + 1) == Some(&b'/')
}

/// Recognize the opening `$tag$` of a dollar-quoted block at `idx`; returns
/// the tag and the index of its closing `$`.
fn try_start_dollar_quote(bytes: &[u8], idx: usize) -> Option<(String, usize)> {
    let mut end = idx + 1;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        if end == idx + 1 && bytes[end].is_ascii_digit() {
            // `$1` is a positional placeholder, not a quote tag
            return None;
        }
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'$' {
        let tag = String::from_utf8_lossy(&bytes[idx + 1..end]).into_owned();
        Some((tag, end))
    } else {
        None
    }
}

fn matches_tag(bytes: &[u8], idx: usize, tag: &str) -> bool {
    let tag_bytes = tag.as_bytes();
    let end = idx + 1 + tag_bytes.len();
    end < bytes.len() && &bytes[idx + 1..end] == tag_bytes && bytes[end] == b'$'
}

fn scan_digits(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let mut idx = start;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == start {
        None
    } else {
        std::str::from_utf8(&bytes[start..idx])
            .ok()
            .and_then(|digits| digits.parse::<usize>().ok())
            .map(|n| (idx, n))
    }
}

fn scan_identifier(bytes: &[u8], start: usize) -> Option<usize> {
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let mut idx = start + 1;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    Some(idx)
}

struct Placeholders {
    max_positional: usize,
    /// Byte ranges (including the leading `:`) and names, in order.
    named: Vec<(Range<usize>, String)>,
}

fn scan(sql: &str) -> Placeholders {
    let bytes = sql.as_bytes();
    let mut found = Placeholders {
        max_positional: 0,
        named: Vec::new(),
    };
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => state = State::BlockComment(1),
                b'$' => {
                    if let Some((digits_end, n)) = scan_digits(bytes, idx + 1) {
                        found.max_positional = found.max_positional.max(n);
                        idx = digits_end - 1;
                    } else if let Some((tag, advance)) = try_start_dollar_quote(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = advance;
                    }
                }
                b':' => {
                    if bytes.get(idx + 1) == Some(&b':') {
                        // type cast, not a placeholder
                        idx += 1;
                    } else if let Some(name_end) = scan_identifier(bytes, idx + 1) {
                        let name = String::from_utf8_lossy(&bytes[idx + 1..name_end]).into_owned();
                        found.named.push((idx..name_end, name));
                        idx = name_end - 1;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                } else if is_block_comment_end(bytes, idx) {
                    if depth == 1 {
                        state = State::Normal;
                    } else {
                        state = State::BlockComment(depth - 1);
                    }
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && matches_tag(bytes, idx, tag) {
                    let tag_len = tag.len();
                    state = State::Normal;
                    idx += tag_len + 1;
                }
            }
        }
        idx += 1;
    }

    found
}

/// A statement rewritten to positional-only placeholders.
#[derive(Debug)]
pub(crate) struct RewrittenSql {
    pub sql: String,
    /// Total number of `$n` slots the statement expects.
    pub slot_count: usize,
    /// 1-based slot assigned to each named placeholder.
    pub names: HashMap<String, usize>,
}

pub(crate) fn rewrite_named(sql: &str) -> RewrittenSql {
    let found = scan(sql);

    let mut names: HashMap<String, usize> = HashMap::new();
    let mut next_slot = found.max_positional;
    for (_, name) in &found.named {
        names.entry(name.clone()).or_insert_with(|| {
            next_slot += 1;
            next_slot
        });
    }

    let mut out = String::with_capacity(sql.len());
    let mut cursor = 0;
    for (range, name) in &found.named {
        out.push_str(&sql[cursor..range.start]);
        out.push('$');
        out.push_str(&names[name].to_string());
        cursor = range.end;
    }
    out.push_str(&sql[cursor..]);

    RewrittenSql {
        sql: out,
        slot_count: next_slot,
        names,
    }
}
