//! Title synthesis for notes without one.
//!
//! Keep leaves many notes untitled; their takeout filename is the export
//! timestamp. The synthesized title combines whatever the filename still
//! says after stripping that timestamp with a short preview of the body.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use keeplist_core::defaults::{
    TITLE_BASE_MAX_CHARS, TITLE_PREVIEW_LINE_CHARS, TITLE_PREVIEW_MAX_LINES,
    TITLE_PREVIEW_SEPARATOR, TITLE_SOURCE_MARKER, TITLE_TRUNCATION_MARKER,
};
use keeplist_core::KeepNote;

/// Takeout timestamp filenames, e.g. `2020-05-17T20_01_56.110+02_00`.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}_\d{2}_\d{2}(\.\d+)?([+-]\d{2}_\d{2}|Z)?")
        .expect("valid timestamp pattern")
});

/// Derive a title base from a source filename: extension off, timestamp-like
/// substrings off, surrounding punctuation trimmed, truncated to the title
/// budget. May return an empty string for pure-timestamp names.
pub fn shorten_filename(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let stripped = TIMESTAMP_RE.replace_all(stem, "");
    let trimmed = stripped.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
    truncate_chars(trimmed, TITLE_BASE_MAX_CHARS)
}

/// Truncate to a character budget, marking the cut.
fn truncate_chars(text: &str, budget: usize) -> String {
    if text.chars().count() > budget {
        let cut: String = text.chars().take(budget).collect();
        format!("{}{}", cut, TITLE_TRUNCATION_MARKER)
    } else {
        text.to_string()
    }
}

/// First non-empty body lines, each truncated, joined by the separator.
fn body_preview(text: &str) -> String {
    let mut parts = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        parts.push(truncate_chars(trimmed, TITLE_PREVIEW_LINE_CHARS));
        if parts.len() >= TITLE_PREVIEW_MAX_LINES {
            break;
        }
    }
    parts.join(TITLE_PREVIEW_SEPARATOR)
}

/// Synthesize a title for an untitled note.
///
/// Falls back to the note's creation date when the filename reduces to
/// nothing, then to a fixed placeholder. Deterministic for equal inputs.
pub fn synthesize_title(note: &KeepNote, source_path: &Path) -> String {
    let mut base = shorten_filename(source_path);
    if base.is_empty() {
        base = note
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "untitled".to_string());
    }

    let preview = body_preview(&note.text_content);
    if preview.is_empty() {
        base
    } else {
        format!("{}: {}", base, preview)
    }
}

/// Assemble the final delivered title: source marker, the note's own title
/// or a synthesized one, and (optionally) the hashtag line.
pub fn compose_title(
    note: &KeepNote,
    source_path: &Path,
    hashtags: &str,
    embed_hashtags: bool,
) -> String {
    let base = if note.has_title() {
        note.title.trim().to_string()
    } else {
        synthesize_title(note, source_path)
    };

    let mut title = format!("{}{}", TITLE_SOURCE_MARKER, base);
    if embed_hashtags && !hashtags.is_empty() {
        title.push(' ');
        title.push_str(hashtags);
    }
    title
}
