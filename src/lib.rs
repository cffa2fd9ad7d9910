//! Cinema showtimes scraped from Greek theater-chain websites.
//!
//! Each chain gets an adapter that reads its listing and film pages into the
//! shared [`Movie`] records. [`MovieRepository`] picks the adapter from the URL
//! host and is the only entry point callers need.

pub mod cache;
pub mod cineland;
pub mod config;
pub mod error;
pub mod fetch;
pub mod movie;
pub mod normalize;
pub mod odeon;
pub mod repository;
pub mod source;
pub mod texnopolis;

use tracing::debug;

pub use cache::MovieCache;
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use fetch::HttpFetcher;
pub use movie::{DetailState, FullMovieInfo, Movie, MovieBasicInfo, Showtime};
pub use repository::MovieRepository;
pub use source::SourceSite;

/// Trait that every site adapter implements
#[async_trait::async_trait]
pub trait CinemaSite: Send + Sync {
    fn site(&self) -> SourceSite;

    /// Parse a listing page into summary records, in page order.
    async fn fetch_listing(&self, fetcher: &HttpFetcher, url: &str) -> Result<Vec<Movie>>;

    /// Parse a film page. `Ok(None)` means the page gave neither a synopsis nor a director.
    async fn fetch_detail(&self, fetcher: &HttpFetcher, url: &str) -> Result<Option<Movie>>;
}

/// Attach `full` only when the page looked parsed; otherwise the caller keeps
/// whatever it already had.
pub(crate) fn accept_detail(basic: MovieBasicInfo, full: FullMovieInfo, url: &str) -> Option<Movie> {
    if full.has_content() {
        return Some(Movie::with_detail(basic, full));
    }
    if full.title.is_empty() {
        debug!(url, "detail page has no title, synopsis or director; markup may have changed");
    } else {
        debug!(url, title = %full.title, "detail page has neither synopsis nor director");
    }
    None
}
