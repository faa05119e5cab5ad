use serde::Deserialize;
use uuid::Uuid;

use arena_core::game::Game;

/// Request payload for creating a new game.
#[derive(Debug, Deserialize)]
pub struct CreateGame {
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
}

impl CreateGame {
    /// Converts the create request into a Game with a fresh ID.
    pub fn into_game(self) -> Game {
        let mut game = Game::new(self.name);
        if let Some(genre) = self.genre {
            game = game.with_genre(genre);
        }
        game
    }
}

/// Request payload for replacing a game.
///
/// Updates are full replacements; an omitted genre clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateGame {
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
}

impl UpdateGame {
    /// Builds the replacement game for `id`.
    pub fn into_game(self, id: Uuid) -> Game {
        Game {
            id,
            name: self.name,
            genre: self.genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_game_without_genre() {
        let payload: CreateGame = serde_json::from_str(r#"{"name":"Chess"}"#).unwrap();
        let game = payload.into_game();

        assert_eq!(game.name, "Chess");
        assert!(game.genre.is_none());
    }

    #[test]
    fn test_update_game_keeps_path_id() {
        let id = Uuid::new_v4();
        let payload: UpdateGame =
            serde_json::from_str(r#"{"name":"Go","genre":"Board"}"#).unwrap();

        let game = payload.into_game(id);

        assert_eq!(game.id, id);
        assert_eq!(game.genre.as_deref(), Some("Board"));
    }
}
