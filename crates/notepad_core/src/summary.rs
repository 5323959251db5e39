//! Note card summary formatting.
//!
//! # Responsibility
//! - Derive display-ready strings (title, preview, date labels) from a note.
//! - Stay free of storage, rendering and clock dependencies.
//!
//! # Invariants
//! - Every function here is total and never panics for a well-typed `Note`.
//! - Preview truncation counts `char`s and never splits a code point.
//! - The created label is emitted only when `created_at != updated_at`.

use crate::model::note::{Note, NoteContent, NoteId};
use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use serde::Serialize;

/// Maximum preview length, in characters, before the ellipsis is appended.
pub const PREVIEW_MAX_CHARS: usize = 150;
/// Shown instead of a preview when the note has no content.
pub const EMPTY_CONTENT_FALLBACK: &str = "내용이 없습니다.";
/// Appended to truncated previews.
pub const PREVIEW_ELLIPSIS: &str = "...";
pub const MODIFIED_LABEL: &str = "수정일:";
pub const CREATED_LABEL: &str = "생성일:";

/// Date labels for one note card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampLabels {
    /// Always present, e.g. `수정일: 2024. 1. 15. 오후 12:00:00`.
    pub modified: String,
    /// Present only for notes edited after creation.
    pub created: Option<String>,
}

/// Display projection of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub preview: String,
    pub modified_label: String,
    pub created_label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returns a length-bounded preview of `content`.
///
/// Absent or empty content yields [`EMPTY_CONTENT_FALLBACK`]. Content longer
/// than `max_length` characters is cut at exactly `max_length` characters and
/// suffixed with [`PREVIEW_ELLIPSIS`]; shorter content is returned unchanged.
pub fn format_preview(content: Option<&str>, max_length: usize) -> String {
    match NoteContent::from_option(content) {
        NoteContent::Absent | NoteContent::Empty => EMPTY_CONTENT_FALLBACK.to_string(),
        NoteContent::Present(text) => match text.char_indices().nth(max_length) {
            None => text.to_string(),
            Some((cut, _)) => {
                let mut preview = String::with_capacity(cut + PREVIEW_ELLIPSIS.len());
                preview.push_str(&text[..cut]);
                preview.push_str(PREVIEW_ELLIPSIS);
                preview
            }
        },
    }
}

/// Builds modified/created labels rendered in `offset` local time.
///
/// `updated_at >= created_at` is the caller's invariant and is not checked.
pub fn format_timestamps(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    offset: FixedOffset,
) -> TimestampLabels {
    let modified = format!(
        "{MODIFIED_LABEL} {}",
        format_local_datetime(updated_at, offset)
    );
    let created = (created_at != updated_at).then(|| {
        format!(
            "{CREATED_LABEL} {}",
            format_local_datetime(created_at, offset)
        )
    });

    TimestampLabels { modified, created }
}

/// Projects a note into its card summary.
pub fn summarize_note(note: &Note, offset: FixedOffset) -> NoteSummary {
    let labels = format_timestamps(note.created_at, note.updated_at, offset);
    NoteSummary {
        id: note.id,
        title: note.title.clone(),
        preview: format_preview(note.content.as_deref(), PREVIEW_MAX_CHARS),
        modified_label: labels.modified,
        created_label: labels.created,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

/// Renders a datetime the way Korean locales print `toLocaleString`,
/// e.g. `2024. 1. 15. 오전 10:00:00`.
pub fn format_local_datetime(at: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = at.with_timezone(&offset);
    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "오후" } else { "오전" };
    format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        meridiem,
        hour,
        local.minute(),
        local.second()
    )
}

/// UTC as a `FixedOffset`, the default display zone.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}
