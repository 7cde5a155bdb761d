//! Command dispatch for the season crawler
//!
//! Resolves configuration for the selected subcommand, builds the collaborators
//! it needs and runs it against the given output sink.

use std::io::Write;
use std::path::Path;

use crate::cache::CacheManager;
use crate::cli::{seasons_to_fetch, Cli, Commands, ParserCommand, SeasonCommand};
use crate::config::{self, SearchSettings};
use crate::data::BangumiClient;
use crate::error::Error;
use crate::parser;
use crate::season::SeasonFetcher;

/// Runs the parsed command line, writing user-facing output to `out`
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<(), Error> {
    match cli.command {
        Commands::Parser(ParserCommand::Init) => {
            let url = config::swagger_url(config::env_lookup)?;
            parser::init(out, &url, Path::new(parser::SPEC_FILE)).await
        }
        Commands::Parser(ParserCommand::Parse { file }) => parser::parse(out, &file).map(|_| ()),
        Commands::Parser(ParserCommand::Generate(args)) => parser::generate(out, &args).await,
        Commands::Season(SeasonCommand::Get { year, season }) => {
            let settings = SearchSettings::from_env()?;
            writeln!(out, "{}", settings.summary())?;

            let client = BangumiClient::new(&settings.access_token, settings.request_timeout)?;
            let fetcher = SeasonFetcher::new(
                &client,
                CacheManager::new(),
                settings.tags.clone(),
                settings.sort_by,
            );
            fetcher
                .run(&year.years(), &seasons_to_fetch(season), out)
                .await
        }
    }
}
