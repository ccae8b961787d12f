pub mod alerts;
pub mod error;
pub mod health;
pub mod points;
