pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod report;
pub mod state;
pub mod ui;
