//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD and listing over the `notes` table.
//! - Translate list sort keys into deterministic SQL ordering.
//!
//! # Invariants
//! - Every read/update/delete is constrained to the owning `user_id`; a
//!   foreign note behaves exactly like a missing one.
//! - `content` keeps `NULL` (absent) distinct from `''` (empty).
//! - Every ordering ends with `id ASC` as a stable tie-break.

use crate::model::note::{Note, NoteId, UserId};
use crate::repo::{ensure_table_ready, from_epoch_ms, to_epoch_ms, RepoError, RepoResult};
use crate::routing::NoteSortKey;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const NOTES_DEFAULT_LIMIT: u32 = 10;
const NOTES_LIMIT_MAX: u32 = 50;

const NOTE_COLUMNS: &[&str] = &["id", "user_id", "title", "content", "created_at", "updated_at"];

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

/// Query options for note list use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListQuery {
    pub user_id: UserId,
    pub sort: NoteSortKey,
    /// Maximum rows to return. Defaults to 10 and clamps to 50.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

impl NoteListQuery {
    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            sort: NoteSortKey::default(),
            limit: None,
            offset: 0,
        }
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note and returns its stable id.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title, content and `updated_at` of an owned note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Gets one owned note by id.
    fn get_note(&self, user_id: &str, note_id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists one user's notes in the requested order.
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>>;
    /// Counts one user's notes.
    fn count_notes(&self, user_id: &str) -> RepoResult<u64>;
    /// Permanently removes an owned note.
    fn delete_note(&self, user_id: &str, note_id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "notes", NOTE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (
                id,
                user_id,
                title,
                content,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id.to_string(),
                note.user_id.as_str(),
                note.title.as_str(),
                note.content.as_deref(),
                to_epoch_ms(note.created_at),
                to_epoch_ms(note.updated_at),
            ],
        )?;

        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?3,
                content = ?4,
                updated_at = ?5
             WHERE id = ?1
               AND user_id = ?2;",
            params![
                note.id.to_string(),
                note.user_id.as_str(),
                note.title.as_str(),
                note.content.as_deref(),
                to_epoch_ms(note.updated_at),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn get_note(&self, user_id: &str, note_id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![note_id.to_string(), user_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        let limit = normalize_note_limit(query.limit);
        let sql = format!(
            "{NOTE_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY {}
             LIMIT ?2 OFFSET ?3;",
            order_by_clause(query.sort)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            query.user_id.as_str(),
            i64::from(limit),
            i64::from(query.offset),
        ])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn count_notes(&self, user_id: &str) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }

    fn delete_note(&self, user_id: &str, note_id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND user_id = ?2;",
            params![note_id.to_string(), user_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }
}

/// Normalizes list limit according to notes contract.
pub fn normalize_note_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => NOTES_DEFAULT_LIMIT,
        Some(value) if value > NOTES_LIMIT_MAX => NOTES_LIMIT_MAX,
        Some(value) => value,
    }
}

fn order_by_clause(sort: NoteSortKey) -> &'static str {
    match sort {
        NoteSortKey::Newest => "created_at DESC, id ASC",
        NoteSortKey::Oldest => "created_at ASC, id ASC",
        NoteSortKey::Updated => "updated_at DESC, id ASC",
        NoteSortKey::Title => "title COLLATE NOCASE ASC, created_at DESC, id ASC",
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id"))
    })?;

    let note = Note {
        id,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: from_epoch_ms(row.get("created_at")?, "notes.created_at")?,
        updated_at: from_epoch_ms(row.get("updated_at")?, "notes.updated_at")?,
    };
    note.validate()?;
    Ok(note)
}
