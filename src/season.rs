//! Season fetch orchestration
//!
//! For each requested (year, season) pair the fetcher consults the response
//! cache, falls back to the search API on a miss, stores the raw response and
//! renders the rankings table. Any failure aborts the remaining pairs.

use std::io::Write;
use std::time::Duration;

use crate::cache::{CacheKey, CacheManager};
use crate::data::{
    ranking_rows, PagedSubject, SearchSubjectsRequest, Season, SortMode, SubjectSearch,
    SEARCH_PAGE_LIMIT,
};
use crate::error::{from_json_str, Error};
use crate::ui::write_rankings;

/// Pause after each network call to stay under the API rate limit
pub const REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Fetches, caches and displays seasonal rankings
pub struct SeasonFetcher<'a> {
    client: &'a dyn SubjectSearch,
    cache: CacheManager,
    tags: Vec<String>,
    sort: SortMode,
    request_delay: Duration,
}

impl<'a> SeasonFetcher<'a> {
    /// Creates a fetcher around an already-configured search client
    pub fn new(
        client: &'a dyn SubjectSearch,
        cache: CacheManager,
        tags: Vec<String>,
        sort: SortMode,
    ) -> Self {
        Self {
            client,
            cache,
            tags,
            sort,
            request_delay: REQUEST_DELAY,
        }
    }

    /// Overrides the post-request pause
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Cache key for one season of one year under this fetcher's settings
    pub fn cache_key(&self, year: i32, season: Season) -> CacheKey {
        CacheKey::new(year, season, &self.tags, self.sort)
    }

    /// Returns the raw response body for a season, from cache when possible
    ///
    /// On a miss the search API is called, the body is validated, written to
    /// the cache and the request delay is observed before returning.
    pub async fn load_page(
        &self,
        year: i32,
        season: Season,
        out: &mut dyn Write,
    ) -> Result<String, Error> {
        let key = self.cache_key(year, season);
        let path = self.cache.cache_path(&key);

        if let Some(body) = self.cache.lookup(&key)? {
            tracing::debug!(%key, "Cache hit");
            writeln!(
                out,
                "Found cached result at {}. Loading from disk...",
                path.display()
            )?;
            return Ok(body);
        }

        let request = SearchSubjectsRequest::for_season(year, season, &self.tags, self.sort)?;
        writeln!(
            out,
            "Fetching rankings for {}, season {}... (no cache)",
            year, season
        )?;
        tracing::info!(%key, air_date = ?request.filter.air_date, "Cache miss, querying API");

        let body = self.client.search_subjects(&request, SEARCH_PAGE_LIMIT).await?;
        // reject bodies that would poison the cache
        from_json_str::<PagedSubject>(&body)?;

        writeln!(out, "Saving result to cache file: {}", path.display())?;
        self.cache.store(&key, &body)?;

        tokio::time::sleep(self.request_delay).await;
        Ok(body)
    }

    /// Fetches one season and writes its rankings table to `out`
    pub async fn fetch_and_display(
        &self,
        year: i32,
        season: Season,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        writeln!(out, "--- Processing {} Season {} ---", year, season)?;

        let body = self.load_page(year, season, out).await?;
        let page: PagedSubject = from_json_str(&body)?;

        if page.data.is_empty() {
            writeln!(out, "No results found for the given season.")?;
            return Ok(());
        }

        let rows = ranking_rows(&page);
        let title = format!("Anime Rankings - {} Q{}", year, season.quarter());
        write_rankings(out, &title, &rows)?;
        Ok(())
    }

    /// Runs every (year, season) pair in order, stopping at the first failure
    pub async fn run(
        &self,
        years: &[i32],
        seasons: &[Season],
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        for &year in years {
            for &season in seasons {
                self.fetch_and_display(year, season, out).await?;
            }
        }
        Ok(())
    }
}
