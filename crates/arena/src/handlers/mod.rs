pub mod error;
pub mod games;
pub mod health;
pub mod tournaments;

pub use error::AppError;
