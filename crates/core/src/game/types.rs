use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Entity;

/// A game title that tournaments can be organised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
}

impl Game {
    /// Creates a new game with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            genre: None,
        }
    }

    /// Sets the genre for this game.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets a specific ID for this game (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl Entity for Game {
    type Id = Uuid;
    const KIND: &'static str = "game";

    fn id(&self) -> Uuid {
        self.id
    }
}
