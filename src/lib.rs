pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod runner;
pub mod state;
