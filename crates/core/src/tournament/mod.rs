//! Tournaments, their date-based prize bonus, and creation notifications.

mod bonus;
mod notify;
mod types;

pub use bonus::BonusStrategy;
pub use notify::{CreationObserver, Notifier};
pub use types::Tournament;
