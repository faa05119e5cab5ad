//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use arena_core::game::Game;
use arena_core::tournament::Tournament;
use chrono::NaiveDate;
use rusqlite::Row;
use uuid::Uuid;

/// Convert a SQLite row to a Game.
///
/// Expected columns: id, name, genre
pub fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
    let id: String = row.get(0)?;

    Ok(Game {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        genre: row.get(2)?,
    })
}

/// Convert a SQLite row to a Tournament.
///
/// Expected columns: id, game_id, name, starts_on, prize_pool
pub fn row_to_tournament(row: &Row) -> rusqlite::Result<Tournament> {
    let id: String = row.get(0)?;
    let game_id: String = row.get(1)?;
    let starts_on: String = row.get(3)?;

    Ok(Tournament {
        id: parse_uuid(&id)?,
        game_id: parse_uuid(&game_id)?,
        name: row.get(2)?,
        starts_on: parse_date(&starts_on)?,
        prize_pool: row.get(4)?,
    })
}

fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
