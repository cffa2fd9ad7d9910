//! Odeon.
//! Catalogue: https://www.odeon.gr/tainies
//!
//! The catalogue is plain HTML with a "current" and an "upcoming" section of
//! `div.movie-card`s, and it is the only place sessions are published. Film pages
//! carry metadata and synopsis but no showtimes, so a detail lookup re-reads the
//! catalogue and picks the card with the same link.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::OdeonConfig;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::movie::{FullMovieInfo, Movie, MovieBasicInfo, Showtime};
use crate::normalize::{
    age_rating_from_phrase, element_text, first_attr, first_text, normalize_room_label,
    resolve_url, same_url, selector, split_cast, strip_label,
};
use crate::source::SourceSite;
use crate::{CinemaSite, accept_detail};

const BASE: &str = "https://www.odeon.gr/";

pub struct OdeonSite {
    catalogue_url: String,
}

impl OdeonSite {
    pub fn new(config: &OdeonConfig) -> Self {
        Self {
            catalogue_url: config.listing.clone(),
        }
    }
}

#[async_trait::async_trait]
impl CinemaSite for OdeonSite {
    fn site(&self) -> SourceSite {
        SourceSite::Odeon
    }

    async fn fetch_listing(&self, fetcher: &HttpFetcher, url: &str) -> Result<Vec<Movie>> {
        let body = fetcher.page(url).await?;
        parse_listing(&body)
    }

    async fn fetch_detail(&self, fetcher: &HttpFetcher, url: &str) -> Result<Option<Movie>> {
        let catalogue_body = fetcher.page(&self.catalogue_url).await?;
        let catalogue = parse_listing(&catalogue_body)?;
        let entry = find_entry(&catalogue, url);
        if entry.is_none() {
            debug!(url, catalogue = %self.catalogue_url, "film not found in catalogue");
        }

        let body = fetcher.page(url).await?;
        parse_detail(&body, url, entry)
    }
}

pub fn find_entry<'a>(catalogue: &'a [Movie], detail_url: &str) -> Option<&'a MovieBasicInfo> {
    catalogue
        .iter()
        .map(|m| &m.basic_info)
        .find(|b| same_url(&b.detail_url, detail_url))
}

/// Selectors used inside one `div.movie-card`.
struct CardSelectors {
    link: Selector,
    poster: Selector,
    premiere: Selector,
    session: Selector,
    day: Selector,
    time: Selector,
    hall: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            link: selector("h2.movie-card__title a")?,
            poster: selector("img.movie-card__poster")?,
            premiere: selector("span.movie-card__premiere")?,
            session: selector("ul.movie-card__sessions li")?,
            day: selector("span.session-day")?,
            time: selector("span.session-time")?,
            hall: selector("span.session-hall")?,
        })
    }
}

/// Current section first, then upcoming, each in page order.
pub fn parse_listing(html: &str) -> Result<Vec<Movie>> {
    let doc = Html::parse_document(html);
    let sels = CardSelectors::new()?;

    let mut movies = Vec::new();
    for (section, is_playing) in [
        ("section.catalogue--current div.movie-card", true),
        ("section.catalogue--upcoming div.movie-card", false),
    ] {
        for card in doc.select(&selector(section)?) {
            movies.push(Movie::new(movie_card(card, &sels, is_playing)));
        }
    }
    debug!(count = movies.len(), "odeon catalogue parsed");
    Ok(movies)
}

fn movie_card(card: ElementRef<'_>, sels: &CardSelectors, is_playing: bool) -> MovieBasicInfo {
    let link = card.select(&sels.link).next();
    let title = link
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let href = link.and_then(|a| a.value().attr("href")).unwrap_or("");
    let poster = first_attr(card, &sels.poster, &["data-lazy-src", "src"]).unwrap_or_default();

    let mut basic = MovieBasicInfo::new(
        title,
        resolve_url(BASE, &poster),
        resolve_url(BASE, href),
        is_playing,
    );
    basic.premiere_date = first_text(card, &sels.premiere)
        .map(|p| strip_label(&p, "Πρεμιέρα"))
        .unwrap_or_default();
    basic.showtimes = sessions(card, sels);
    basic
}

/// `[day, time]`, or `[day, time, hall]` when the session names its hall.
fn sessions(card: ElementRef<'_>, sels: &CardSelectors) -> Vec<Showtime> {
    let mut out = Vec::new();
    for li in card.select(&sels.session) {
        let (Some(day), Some(time)) = (first_text(li, &sels.day), first_text(li, &sels.time)) else {
            continue;
        };
        if day.is_empty() || time.is_empty() {
            continue;
        }
        let mut parts = vec![day, time];
        if let Some(hall) = first_text(li, &sels.hall).filter(|h| !h.is_empty()) {
            parts.push(normalize_room_label(&hall));
        }
        out.push(Showtime(parts));
    }
    out
}

/// Parse a film page; showtimes, premiere date and playing status come from
/// the matching catalogue card when there is one.
pub fn parse_detail(
    html: &str,
    url: &str,
    catalogue_entry: Option<&MovieBasicInfo>,
) -> Result<Option<Movie>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title = first_text(root, &selector("h1.movie-details__title, h1")?).unwrap_or_default();
    let poster_url = first_attr(
        root,
        &selector("div.movie-details__poster img")?,
        &["data-lazy-src", "src"],
    )
    .map(|src| resolve_url(BASE, &src))
    .or_else(|| catalogue_entry.map(|e| e.poster_url.clone()))
    .unwrap_or_default();

    let meta: Vec<String> = doc
        .select(&selector("ul.movie-details__meta li")?)
        .map(element_text)
        .collect();
    let labelled = |label: &str| {
        meta.iter()
            .find(|t| t.contains(label))
            .map(|t| strip_label(t, label))
            .unwrap_or_default()
    };

    let description = doc
        .select(&selector("div.movie-details__synopsis p")?)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let age_rating = first_text(root, &selector("div.movie-details__rating")?)
        .map(|r| age_rating_from_phrase(&r))
        .unwrap_or_else(|| "-".to_string());

    let trailer_url = first_attr(
        root,
        &selector("div.movie-details__trailer iframe")?,
        &["data-src-cmplz", "src"],
    )
    .unwrap_or_default();

    let showtime = catalogue_entry
        .map(|e| e.showtimes.clone())
        .unwrap_or_default();
    let projection_room = distinct_halls(&showtime);
    let premiere_date = catalogue_entry
        .map(|e| e.premiere_date.clone())
        .unwrap_or_default();
    let is_playing = catalogue_entry.is_none_or(|e| e.is_playing);

    let full = FullMovieInfo {
        title: title.clone(),
        poster_url: poster_url.clone(),
        duration: Some(labelled("Διάρκεια:"))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "-".to_string()),
        genre: labelled("Είδος:"),
        age_rating,
        projection_room,
        description,
        director: labelled("Σκηνοθεσία:"),
        cast: split_cast(&labelled("Ηθοποιοί:")),
        trailer_url,
        showtime: showtime.clone(),
        premiere_date: premiere_date.clone(),
    };

    let mut basic = MovieBasicInfo::new(title, poster_url, url, is_playing);
    basic.showtimes = showtime;
    basic.premiere_date = premiere_date;
    Ok(accept_detail(basic, full, url))
}

fn distinct_halls(showtimes: &[Showtime]) -> String {
    let mut halls: Vec<&str> = Vec::new();
    for hall in showtimes.iter().filter_map(Showtime::theater) {
        if !halls.contains(&hall) {
            halls.push(hall);
        }
    }
    if halls.is_empty() {
        "-".to_string()
    } else {
        halls.join(", ")
    }
}
