//! Shared movie records produced by every site adapter.

use serde::{Deserialize, Serialize};

/// One raw showtime entry as the site printed it.
///
/// Arity is source specific: `[day, time]` for sites that only list slots,
/// `[day, times, theater]` when a room is captured too. Entries are never
/// padded with empty trailing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Showtime(pub Vec<String>);

impl Showtime {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn day(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }

    pub fn times(&self) -> &str {
        self.0.get(1).map(String::as_str).unwrap_or("")
    }

    /// Theater/room label, present only on three-element entries.
    pub fn theater(&self) -> Option<&str> {
        self.0.get(2).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summary record produced by a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieBasicInfo {
    pub title: String,
    pub poster_url: String,
    /// Absolute detail-page URL; the key used to merge listing and detail results.
    pub detail_url: String,
    /// `true` for "now playing", `false` for "coming soon".
    pub is_playing: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub showtimes: Vec<Showtime>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub premiere_date: String,
}

impl MovieBasicInfo {
    pub fn new(
        title: impl Into<String>,
        poster_url: impl Into<String>,
        detail_url: impl Into<String>,
        is_playing: bool,
    ) -> Self {
        Self {
            title: title.into(),
            poster_url: poster_url.into(),
            detail_url: detail_url.into(),
            is_playing,
            showtimes: Vec::new(),
            premiere_date: String::new(),
        }
    }
}

/// Everything a detail page yields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullMovieInfo {
    pub title: String,
    pub poster_url: String,
    pub duration: String,
    pub genre: String,
    pub age_rating: String,
    pub projection_room: String,
    pub description: String,
    pub director: String,
    pub cast: Vec<String>,
    pub trailer_url: String,
    pub showtime: Vec<Showtime>,
    pub premiere_date: String,
}

impl FullMovieInfo {
    /// A detail page counts as parsed only when it produced a synopsis or a director.
    pub fn has_content(&self) -> bool {
        !self.description.is_empty() || !self.director.is_empty()
    }
}

/// Whether the detail page of a movie has been loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "info", rename_all = "snake_case")]
pub enum DetailState {
    #[default]
    NotFetched,
    Fetched(FullMovieInfo),
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub basic_info: MovieBasicInfo,
    #[serde(default)]
    pub detail: DetailState,
}

impl Movie {
    pub fn new(basic_info: MovieBasicInfo) -> Self {
        Self {
            basic_info,
            detail: DetailState::NotFetched,
        }
    }

    pub fn with_detail(basic_info: MovieBasicInfo, info: FullMovieInfo) -> Self {
        Self {
            basic_info,
            detail: DetailState::Fetched(info),
        }
    }

    pub fn detail_url(&self) -> &str {
        &self.basic_info.detail_url
    }

    pub fn full_info(&self) -> Option<&FullMovieInfo> {
        match &self.detail {
            DetailState::Fetched(info) => Some(info),
            _ => None,
        }
    }
}
