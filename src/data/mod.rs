//! Core data models for the Bangumi season crawler
//!
//! This module contains the request and response types of the subject search
//! endpoint, the display rows derived from them, and the submodules for the
//! API client, broadcast seasons and the OpenAPI document schema.

pub mod bangumi;
pub mod openapi;
pub mod season;

pub use bangumi::{BangumiClient, SubjectSearch, SEARCH_PAGE_LIMIT};
pub use openapi::OpenApiDocument;
pub use season::{air_date_filter, Season};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Base URL for subject detail pages
pub const SUBJECT_URL_BASE: &str = "https://bgm.tv/subject";

/// Catalog subject type; only anime is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum SubjectType {
    Anime = 2,
}

/// Ordering applied by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Relevance to the keyword
    Match,
    /// Number of collections
    Heat,
    /// Catalog rank
    #[default]
    Rank,
    /// Rating score
    Score,
}

impl SortMode {
    /// Lowercase name used in requests and cache keys
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Match => "match",
            SortMode::Heat => "heat",
            SortMode::Rank => "rank",
            SortMode::Score => "score",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "match" => Ok(SortMode::Match),
            "heat" => Ok(SortMode::Heat),
            "rank" => Ok(SortMode::Rank),
            "score" => Ok(SortMode::Score),
            _ => Err(Error::Config(format!(
                "Invalid sort option '{}'. Allowed values are: 'match', 'heat', 'rank', 'score'",
                s
            ))),
        }
    }
}

/// Request body for `POST /v0/search/subjects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSubjectsRequest {
    pub keyword: String,
    pub sort: SortMode,
    pub filter: SearchFilter,
}

/// Filter section of a subject search
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilter {
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub subject_type: Vec<SubjectType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub air_date: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
}

impl SearchSubjectsRequest {
    /// Builds an anime search restricted to one season of one year
    pub fn for_season(
        year: i32,
        season: Season,
        tags: &[String],
        sort: SortMode,
    ) -> Result<Self, Error> {
        let filter = SearchFilter {
            subject_type: vec![SubjectType::Anime],
            air_date: season.air_date_filter(year)?.to_vec(),
            tag: tags.to_vec(),
        };
        Ok(Self {
            keyword: String::new(),
            sort,
            filter,
        })
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagedSubject {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub data: Vec<Subject>,
}

/// A catalog entry in search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    /// Original title
    #[serde(default)]
    pub name: String,
    /// Chinese title
    #[serde(default)]
    pub name_cn: String,
    /// First air date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Rating summary attached to a subject
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub rank: i64,
    /// Number of votes
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub score: f64,
}

/// A single line of the rankings table
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    /// Catalog rank, 0 when unranked
    pub rank: i64,
    pub title: String,
    pub air_date: String,
    /// Score and vote count, when both are known
    pub score: Option<(f64, i64)>,
    pub id: i64,
}

impl RankingRow {
    /// Builds a row from a subject, or `None` if it has no displayable title
    pub fn from_subject(subject: &Subject) -> Option<Self> {
        let title = if !subject.name_cn.is_empty() {
            subject.name_cn.clone()
        } else if !subject.name.is_empty() {
            subject.name.clone()
        } else {
            return None;
        };

        let score = subject
            .rating
            .as_ref()
            .filter(|r| r.score != 0.0 && r.total != 0)
            .map(|r| (r.score, r.total));

        Some(Self {
            rank: subject.rating.as_ref().map(|r| r.rank).unwrap_or_default(),
            title,
            air_date: subject.date.clone().unwrap_or_else(|| "N/A".to_string()),
            score,
            id: subject.id,
        })
    }

    /// Score column text
    pub fn score_text(&self) -> String {
        match self.score {
            Some((score, votes)) => format!("{:.2} ({} votes)", score, votes),
            None => "N/A".to_string(),
        }
    }

    /// Detail page for the subject
    pub fn url(&self) -> String {
        format!("{}/{}", SUBJECT_URL_BASE, self.id)
    }
}

/// Converts a result page into display rows, keeping the returned order
pub fn ranking_rows(page: &PagedSubject) -> Vec<RankingRow> {
    page.data.iter().filter_map(RankingRow::from_subject).collect()
}
