pub mod answers;
pub mod health;
pub mod questions;
