//! Command-line interface parsing for the season crawler
//!
//! This module defines the `parser` and `season` subcommand groups using clap,
//! along with the value parsers for the `--year` and `--season` arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::data::Season;

/// Error types for CLI argument parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// A year range whose parts are not numbers, or whose start is after its end
    #[error("Year range must be in the format YYYY-YYYY (e.g., 2022-2023), got '{0}'")]
    InvalidYearRange(String),

    /// A single year that is not a number
    #[error("Year must be a number or a range (e.g., 2023 or 2022-2023), got '{0}'")]
    InvalidYear(String),

    /// A season that is not one of the quarter start months
    #[error("Invalid season: '{0}'. Valid seasons: 1, 4, 7, 10")]
    InvalidSeason(String),
}

/// Bangumi season crawler - seasonal anime rankings from the Bangumi API
#[derive(Parser, Debug)]
#[command(name = "bgm-season")]
#[command(about = "Fetch, cache and display seasonal anime rankings from the Bangumi API")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with the Bangumi OpenAPI document
    #[command(subcommand)]
    Parser(ParserCommand),

    /// Fetch seasonal rankings
    #[command(subcommand)]
    Season(SeasonCommand),
}

#[derive(Subcommand, Debug)]
pub enum ParserCommand {
    /// Download the OpenAPI document named by BANGUMI_SWAGGER to bangumi.json
    Init,

    /// Validate a local OpenAPI document and print a summary
    Parse {
        /// Path to the OpenAPI JSON file
        #[arg(short, long, default_value = "bangumi.json")]
        file: PathBuf,
    },

    /// Generate a client with an external generator and install it
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI JSON file
    #[arg(short, long, default_value = "bangumi.json")]
    pub file: PathBuf,

    /// Directory to write the generated client to
    #[arg(short, long, default_value = "bangumi_sdk")]
    pub output: PathBuf,

    /// Path to the generator config file
    #[arg(short, long, default_value = "openapi-client-config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum SeasonCommand {
    /// Fetch and display rankings for a season or range of seasons
    ///
    /// Examples:
    ///   bgm-season season get --year 2023 --season 4
    ///   bgm-season season get --year 2022-2023
    Get {
        /// The year or year range (e.g., 2023 or 2022-2023) to fetch
        #[arg(short, long, value_parser = parse_year_range)]
        year: YearRange,

        /// The season to fetch (1, 4, 7, 10). If omitted, all seasons are fetched
        #[arg(short, long, value_parser = parse_season_arg)]
        season: Option<Season>,
    },
}

/// An inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Every year in the range, in ascending order
    pub fn years(&self) -> Vec<i32> {
        (self.start..=self.end).collect()
    }
}

/// Parses a single year (`2023`) or an inclusive range (`2022-2023`)
///
/// # Returns
/// * `Ok(YearRange)` if the input is a year or a non-descending range
/// * `Err(CliError)` if a part is not a number or the range is reversed
pub fn parse_year_range(s: &str) -> Result<YearRange, CliError> {
    let s = s.trim();
    match s.split_once('-') {
        Some((start, end)) => {
            let invalid = || CliError::InvalidYearRange(s.to_string());
            let start: i32 = start.trim().parse().map_err(|_| invalid())?;
            let end: i32 = end.trim().parse().map_err(|_| invalid())?;
            if start > end {
                return Err(invalid());
            }
            Ok(YearRange { start, end })
        }
        None => {
            let year: i32 = s.parse().map_err(|_| CliError::InvalidYear(s.to_string()))?;
            Ok(YearRange {
                start: year,
                end: year,
            })
        }
    }
}

/// Parses a season argument given as its starting month
pub fn parse_season_arg(s: &str) -> Result<Season, CliError> {
    s.trim()
        .parse::<u32>()
        .ok()
        .and_then(|month| Season::from_month(month).ok())
        .ok_or_else(|| CliError::InvalidSeason(s.to_string()))
}

/// Seasons to fetch: the requested one, or all four quarters
pub fn seasons_to_fetch(season: Option<Season>) -> Vec<Season> {
    match season {
        Some(season) => vec![season],
        None => Season::ALL.to_vec(),
    }
}
