use tracing::{debug, info, warn};

use crate::CinemaSite;
use crate::cineland::CinelandSite;
use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::fetch::HttpFetcher;
use crate::movie::Movie;
use crate::odeon::OdeonSite;
use crate::source::SourceSite;
use crate::texnopolis::TexnopolisSite;

/// Entry point for callers: routes a URL to its site adapter and never fails.
///
/// Every error (unknown host, network, markup) ends here as an empty list or
/// `None`; the cause only shows up in the logs.
pub struct MovieRepository {
    fetcher: HttpFetcher,
    cineland: CinelandSite,
    texnopolis: TexnopolisSite,
    odeon: OdeonSite,
}

impl MovieRepository {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::from_config(config)?, config))
    }

    pub fn with_fetcher(fetcher: HttpFetcher, config: &Config) -> Self {
        Self {
            fetcher,
            cineland: CinelandSite::new(&config.sites.cineland),
            texnopolis: TexnopolisSite::new(),
            odeon: OdeonSite::new(&config.sites.odeon),
        }
    }

    fn adapter(&self, site: SourceSite) -> Option<&dyn CinemaSite> {
        match site {
            SourceSite::Cineland => Some(&self.cineland),
            SourceSite::Texnopolis => Some(&self.texnopolis),
            SourceSite::Odeon => Some(&self.odeon),
            SourceSite::Unknown => None,
        }
    }

    fn route(&self, url: &str) -> Result<&dyn CinemaSite> {
        self.adapter(SourceSite::from_url(url))
            .ok_or_else(|| ScrapeError::UnsupportedSite(url.to_string()))
    }

    /// Movies on a listing page. Empty for unknown hosts and on any failure.
    pub async fn fetch_movies(&self, url: &str) -> Vec<Movie> {
        match self.try_fetch_movies(url).await {
            Ok(movies) => {
                info!(url, count = movies.len(), "listing fetched");
                movies
            }
            Err(ScrapeError::UnsupportedSite(_)) => {
                debug!(url, "no adapter for listing URL");
                Vec::new()
            }
            Err(e) => {
                warn!(url, error = %e, "listing fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch_movies(&self, url: &str) -> Result<Vec<Movie>> {
        let adapter = self.route(url)?;
        let movies = adapter.fetch_listing(&self.fetcher, url).await?;
        for movie in movies.iter().filter(|m| m.detail_url().is_empty()) {
            warn!(
                url,
                site = %adapter.site(),
                title = %movie.basic_info.title,
                "listing item has no detail link"
            );
        }
        Ok(movies)
    }

    /// Full record for a film page, or `None` for unknown hosts, failed
    /// fetches and pages that yield neither synopsis nor director.
    pub async fn fetch_detailed_movie_info(&self, url: &str) -> Option<Movie> {
        match self.try_fetch_detail(url).await {
            Ok(Some(movie)) => Some(movie),
            Ok(None) => {
                debug!(url, "detail page yielded no usable content");
                None
            }
            Err(ScrapeError::UnsupportedSite(_)) => {
                debug!(url, "no adapter for detail URL");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "detail fetch failed");
                None
            }
        }
    }

    async fn try_fetch_detail(&self, url: &str) -> Result<Option<Movie>> {
        let adapter = self.route(url)?;
        adapter.fetch_detail(&self.fetcher, url).await
    }

    /// Fetch several listings one after another and concatenate them.
    pub async fn fetch_all<'a, I>(&self, urls: I) -> Vec<Movie>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut all = Vec::new();
        for url in urls {
            all.extend(self.fetch_movies(url).await);
        }
        all
    }
}
