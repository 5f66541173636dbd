pub mod app;
pub mod colors;
pub mod config;
pub mod display;
pub mod error;
pub mod grid;
pub mod help;
pub mod settings;
pub mod sim;
pub mod terminal;
