pub mod health;
pub mod ui;
pub mod upload;
