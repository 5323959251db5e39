use chrono::{DateTime, Utc};
use notepad_core::{
    format_preview, format_timestamps, summarize_note, utc_offset, Note, EMPTY_CONTENT_FALLBACK,
    PREVIEW_MAX_CHARS,
};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn preview_of_200_chars_is_cut_to_150_plus_ellipsis() {
    let content = "a".repeat(200);
    let preview = format_preview(Some(&content), PREVIEW_MAX_CHARS);
    assert_eq!(preview, format!("{}...", "a".repeat(150)));
}

#[test]
fn preview_lengths_around_the_boundary() {
    for length in [0usize, 1, 149, 150, 151, 300] {
        let content = "z".repeat(length);
        let preview = format_preview(Some(&content), PREVIEW_MAX_CHARS);
        if length == 0 {
            assert_eq!(preview, EMPTY_CONTENT_FALLBACK);
        } else if length <= PREVIEW_MAX_CHARS {
            assert_eq!(preview, content);
        } else {
            assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
            assert!(preview.ends_with("..."));
        }
    }
}

#[test]
fn null_content_uses_fallback() {
    assert_eq!(format_preview(None, PREVIEW_MAX_CHARS), "내용이 없습니다.");
}

#[test]
fn edited_note_shows_both_labels() {
    let labels = format_timestamps(
        at("2024-01-15T10:00:00Z"),
        at("2024-01-15T12:00:00Z"),
        utc_offset(),
    );
    assert!(labels.modified.starts_with("수정일:"));
    assert!(labels.modified.contains("12:00:00"));
    let created = labels.created.expect("created label for edited note");
    assert!(created.starts_with("생성일:"));
    assert!(created.contains("10:00:00"));
}

#[test]
fn summary_serializes_for_the_card_view() {
    let mut note = Note::new(
        "user-1",
        "Shopping",
        Some("milk, eggs".to_string()),
        at("2024-01-15T10:00:00Z"),
    );
    note.touch(at("2024-01-15T12:00:00Z"));

    let summary = summarize_note(&note, utc_offset());
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["title"], "Shopping");
    assert_eq!(json["preview"], "milk, eggs");
    assert_eq!(json["modifiedLabel"], "수정일: 2024. 1. 15. 오후 12:00:00");
    assert_eq!(json["createdLabel"], "생성일: 2024. 1. 15. 오전 10:00:00");
    assert_eq!(json["id"], note.id.to_string());
}
