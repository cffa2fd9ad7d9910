//! In-memory movie list keyed by detail URL.
//!
//! Display order is listing order. Detail results are merged by URL, never by
//! position, since a refresh may reorder the listing. Lookups go through
//! [`url_key`], so a trailing slash or host case does not split an entry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::movie::{DetailState, Movie};
use crate::normalize::url_key;

#[derive(Debug, Clone, Default)]
pub struct MovieCache {
    order: Vec<String>,
    movies: HashMap<String, Movie>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl MovieCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh listing.
    ///
    /// Duplicate URLs keep their first occurrence. Entries without a detail
    /// URL cannot be merged into and are left out. A detail already fetched
    /// for a URL that is still listed survives the refresh.
    pub fn replace_listing(&mut self, listing: Vec<Movie>) {
        let mut previous = std::mem::take(&mut self.movies);
        self.order.clear();

        for mut movie in listing {
            let key = url_key(movie.detail_url());
            if key.is_empty() {
                debug!(title = %movie.basic_info.title, "listing entry without a URL skipped");
                continue;
            }
            if self.movies.contains_key(&key) {
                debug!(url = %key, "duplicate listing entry skipped");
                continue;
            }
            if let Some(old) = previous.remove(&key)
                && matches!(old.detail, DetailState::Fetched(_))
                && matches!(movie.detail, DetailState::NotFetched)
            {
                movie.detail = old.detail;
            }
            self.order.push(key.clone());
            self.movies.insert(key, movie);
        }
        self.refreshed_at = Some(Utc::now());
    }

    /// Merge a detail result into the entry with the same URL.
    ///
    /// The detail state is replaced as a whole; the listing's title and poster
    /// are only overwritten by non-empty values, and the playing status is
    /// always the listing's. Returns `false` when no entry has that URL.
    pub fn apply_detail(&mut self, detailed: Movie) -> bool {
        let Some(entry) = self.movies.get_mut(&url_key(detailed.detail_url())) else {
            debug!(url = %detailed.detail_url(), "detail for a URL not in the cache");
            return false;
        };
        if matches!(detailed.detail, DetailState::NotFetched) {
            return true;
        }
        let basic = detailed.basic_info;
        if !basic.title.is_empty() {
            entry.basic_info.title = basic.title;
        }
        if !basic.poster_url.is_empty() {
            entry.basic_info.poster_url = basic.poster_url;
        }
        entry.detail = detailed.detail;
        true
    }

    /// Record a failed detail fetch, unless an earlier fetch succeeded.
    pub fn mark_failed(&mut self, url: &str) -> bool {
        match self.movies.get_mut(&url_key(url)) {
            Some(entry) => {
                if !matches!(entry.detail, DetailState::Fetched(_)) {
                    entry.detail = DetailState::FetchFailed;
                }
                true
            }
            None => false,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Movie> {
        self.movies.get(&url_key(url))
    }

    /// All movies in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.order.iter().filter_map(|url| self.movies.get(url))
    }

    pub fn now_playing(&self) -> Vec<&Movie> {
        self.iter().filter(|m| m.basic_info.is_playing).collect()
    }

    pub fn coming_soon(&self) -> Vec<&Movie> {
        self.iter().filter(|m| !m.basic_info.is_playing).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}
