use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Entity;

use super::BonusStrategy;

/// A competition for a single game, starting on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub game_id: Uuid,
    pub name: String,
    pub starts_on: NaiveDate,
    /// Base prize pool in minor currency units (cents).
    pub prize_pool: i64,
}

impl Tournament {
    /// Creates a new tournament with a fresh ID.
    pub fn new(game_id: Uuid, name: impl Into<String>, starts_on: NaiveDate, prize_pool: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            name: name.into(),
            starts_on,
            prize_pool,
        }
    }

    /// Sets a specific ID for this tournament (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns the bonus strategy that applies on the start date.
    pub fn bonus_strategy(&self) -> BonusStrategy {
        BonusStrategy::for_date(self.starts_on)
    }

    /// Returns the prize pool after the start-date bonus is applied.
    pub fn bonus_prize_pool(&self) -> i64 {
        self.bonus_strategy().apply(self.prize_pool)
    }
}

impl Entity for Tournament {
    type Id = Uuid;
    const KIND: &'static str = "tournament";

    fn id(&self) -> Uuid {
        self.id
    }
}
