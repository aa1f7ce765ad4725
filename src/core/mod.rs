pub mod config;
pub mod detector;
pub mod directory;
pub mod graph;
pub mod models;
pub mod monitor;
pub mod telegram;
