//! Bangumi season crawler library
//!
//! Exposes the command modules so the binary and the integration tests share
//! one implementation.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod parser;
pub mod season;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::Error;
