//! Operator CLI for Notepad.
//!
//! # Responsibility
//! - Smoke-check `notepad_core` linkage (`ping`).
//! - Prepare a database file, issue sessions for sign-in and purge expired ones.
//! - Print note card summaries the way the list view renders them.

use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand};
use notepad_core::db::open_db;
use notepad_core::{
    init_logging, LoggingConfig, NoteListParams, NoteService, SessionRepository,
    SqliteNoteRepository, SqliteSessionRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "notepad", author, version, about = "Notepad operator tools")]
struct Cli {
    /// SQLite database file.
    #[arg(
        long,
        global = true,
        env = "NOTEPAD_DATABASE_PATH",
        default_value = "./.db/notepad.sqlite3"
    )]
    db: PathBuf,

    /// Log level written to stderr.
    #[arg(long, global = true, env = "NOTEPAD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print core linkage and version")]
    Ping,

    #[command(about = "Create the database file and apply migrations")]
    InitDb,

    #[command(about = "Issue a session token for a user")]
    IssueSession {
        user_id: String,
    },

    #[command(about = "Delete expired sessions")]
    PurgeSessions,

    #[command(about = "Print note summaries for a user")]
    List {
        user_id: String,
        /// newest | oldest | updated | title
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        page: Option<String>,
        /// Display offset in whole hours east of UTC.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        utc_offset_hours: i32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&LoggingConfig::stderr(cli.log_level.as_str())) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Ping => {
            println!("notepad_core ping={}", notepad_core::ping());
            println!("notepad_core version={}", notepad_core::core_version());
        }
        Commands::InitDb => {
            open_db(&cli.db)?;
            println!("database ready: {}", cli.db.display());
        }
        Commands::IssueSession { user_id } => {
            let conn = open_db(&cli.db)?;
            let sessions = SqliteSessionRepository::try_new(&conn)?;
            let session = sessions.create_session(&user_id, Utc::now())?;
            println!("{}", session.token);
            log::info!(
                "event=session_issue module=cli status=ok expires_at={}",
                session.expires_at.to_rfc3339()
            );
        }
        Commands::PurgeSessions => {
            let conn = open_db(&cli.db)?;
            let sessions = SqliteSessionRepository::try_new(&conn)?;
            let removed = sessions.purge_expired(Utc::now())?;
            log::info!("event=session_purge module=cli status=ok removed={}", removed);
            println!("removed {removed} expired sessions");
        }
        Commands::List {
            user_id,
            sort,
            page,
            utc_offset_hours,
        } => {
            let offset = display_offset(utc_offset_hours)
                .ok_or_else(|| format!("utc offset out of range: {utc_offset_hours}"))?;
            let params = NoteListParams::from_query(sort.as_deref(), page.as_deref());

            let conn = open_db(&cli.db)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let page = service.list_notes(&user_id, params)?;

            println!(
                "{} page {}/{} ({} notes)",
                page.params.to_query_string(),
                page.params.page,
                page.total_pages,
                page.total_items
            );
            for summary in page.summaries(offset) {
                println!();
                println!("[{}] {}", summary.id, summary.title);
                println!("  {}", summary.preview);
                println!("  {}", summary.modified_label);
                if let Some(created) = summary.created_label {
                    println!("  {created}");
                }
            }
        }
    }
    Ok(())
}

/// Whole-hour offset east of UTC, `None` when out of range.
fn display_offset(hours: i32) -> Option<FixedOffset> {
    hours.checked_mul(3600).and_then(FixedOffset::east_opt)
}

#[cfg(test)]
mod tests {
    use super::display_offset;

    #[test]
    fn display_offset_accepts_real_zones() {
        assert_eq!(display_offset(9).map(|o| o.local_minus_utc()), Some(9 * 3600));
        assert_eq!(display_offset(-5).map(|o| o.local_minus_utc()), Some(-5 * 3600));
    }

    #[test]
    fn display_offset_rejects_out_of_range_hours() {
        assert_eq!(display_offset(24), None);
        assert_eq!(display_offset(i32::MAX), None);
        assert_eq!(display_offset(i32::MIN), None);
    }
}
