//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
///
/// `tournaments.game_id` deliberately has no foreign key: referential checks
/// happen in the HTTP layer so that every backend behaves the same.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    genre TEXT
);

CREATE TABLE IF NOT EXISTS tournaments (
    id TEXT PRIMARY KEY,
    game_id TEXT NOT NULL,
    name TEXT NOT NULL,
    starts_on TEXT NOT NULL,
    prize_pool INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tournaments_game_id ON tournaments(game_id);
"#;

// Game queries
pub const INSERT_GAME: &str = r#"
INSERT INTO games (id, name, genre)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_GAMES: &str = r#"
SELECT id, name, genre
FROM games
ORDER BY id ASC
"#;

pub const SELECT_GAME_BY_ID: &str = r#"
SELECT id, name, genre
FROM games
WHERE id = ?1
"#;

pub const UPDATE_GAME: &str = r#"
UPDATE games
SET name = ?2, genre = ?3
WHERE id = ?1
"#;

pub const DELETE_GAME: &str = r#"
DELETE FROM games
WHERE id = ?1
"#;

// Tournament queries
pub const INSERT_TOURNAMENT: &str = r#"
INSERT INTO tournaments (id, game_id, name, starts_on, prize_pool)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_TOURNAMENTS: &str = r#"
SELECT id, game_id, name, starts_on, prize_pool
FROM tournaments
ORDER BY id ASC
"#;

pub const SELECT_TOURNAMENT_BY_ID: &str = r#"
SELECT id, game_id, name, starts_on, prize_pool
FROM tournaments
WHERE id = ?1
"#;

pub const UPDATE_TOURNAMENT: &str = r#"
UPDATE tournaments
SET game_id = ?2, name = ?3, starts_on = ?4, prize_pool = ?5
WHERE id = ?1
"#;

pub const DELETE_TOURNAMENT: &str = r#"
DELETE FROM tournaments
WHERE id = ?1
"#;
