//! SQLite repository implementation.
//!
//! A single `SqliteRepository` holds one connection and implements
//! `Repository<Game>` and `Repository<Tournament>`.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use arena_core::game::Game;
use arena_core::storage::{Entity, Repository, RepositoryError, Result};
use arena_core::tournament::Tournament;

use super::conversions::{format_date, row_to_game, row_to_tournament};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns an affected-row count of zero into `QueryReturnedNoRows`.
fn expect_row(rows: usize) -> tokio_rusqlite::Result<()> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// Repository<Game> implementation
// ============================================================================

#[async_trait]
impl Repository<Game> for SqliteRepository {
    async fn find_all(&self) -> Result<Vec<Game>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_GAMES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_game).map_err(wrap_err)?;

                let mut games = Vec::new();
                for row_result in rows {
                    games.push(row_result.map_err(wrap_err)?);
                }
                Ok(games)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Game::KIND))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_GAME_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_game) {
                    Ok(game) => Ok(Some(game)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Game::KIND, id.to_string()))
    }

    async fn create(&self, game: &Game) -> Result<()> {
        let id = game.id.to_string();
        let name = game.name.clone();
        let genre = game.genre.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_GAME, rusqlite::params![id, name, genre])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Game::KIND, game.id.to_string()))
    }

    async fn update(&self, game: &Game) -> Result<()> {
        let id = game.id.to_string();
        let name = game.name.clone();
        let genre = game.genre.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_GAME, rusqlite::params![id, name, genre])
                    .map_err(wrap_err)?;
                expect_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Game::KIND, game.id.to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_GAME, [&id_str])
                    .map_err(wrap_err)?;
                expect_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Game::KIND, id.to_string()))
    }
}

// ============================================================================
// Repository<Tournament> implementation
// ============================================================================

#[async_trait]
impl Repository<Tournament> for SqliteRepository {
    async fn find_all(&self) -> Result<Vec<Tournament>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_TOURNAMENTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_tournament).map_err(wrap_err)?;

                let mut tournaments = Vec::new();
                for row_result in rows {
                    tournaments.push(row_result.map_err(wrap_err)?);
                }
                Ok(tournaments)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Tournament::KIND))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tournament>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TOURNAMENT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_tournament) {
                    Ok(tournament) => Ok(Some(tournament)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Tournament::KIND, id.to_string()))
    }

    async fn create(&self, tournament: &Tournament) -> Result<()> {
        let id = tournament.id.to_string();
        let game_id = tournament.game_id.to_string();
        let name = tournament.name.clone();
        let starts_on = format_date(&tournament.starts_on);
        let prize_pool = tournament.prize_pool;

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TOURNAMENT,
                    rusqlite::params![id, game_id, name, starts_on, prize_pool],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(e, Tournament::KIND, tournament.id.to_string())
            })
    }

    async fn update(&self, tournament: &Tournament) -> Result<()> {
        let id = tournament.id.to_string();
        let game_id = tournament.game_id.to_string();
        let name = tournament.name.clone();
        let starts_on = format_date(&tournament.starts_on);
        let prize_pool = tournament.prize_pool;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TOURNAMENT,
                        rusqlite::params![id, game_id, name, starts_on, prize_pool],
                    )
                    .map_err(wrap_err)?;
                expect_row(rows)
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(e, Tournament::KIND, tournament.id.to_string())
            })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TOURNAMENT, [&id_str])
                    .map_err(wrap_err)?;
                expect_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, Tournament::KIND, id.to_string()))
    }
}
