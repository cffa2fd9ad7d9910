//! Cineland Pantelis (Patras).
//! Now playing: https://cinelandpantelis.gr/proballontai.html
//! Coming soon: https://cinelandpantelis.gr/prosechos.html
//! Listing pages are a `div.item` grid; film pages keep their metadata in a `<table>`.

use std::collections::HashMap;

use scraper::Html;
use tracing::debug;

use crate::config::CinelandConfig;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::movie::{FullMovieInfo, Movie, MovieBasicInfo, Showtime};
use crate::normalize::{
    ROOM_MARKER, element_text, first_attr, first_text, resolve_url, same_url, selector,
    split_cast,
};
use crate::source::SourceSite;
use crate::{CinemaSite, accept_detail};

const BASE: &str = "https://cinelandpantelis.gr/";

pub struct CinelandSite {
    coming_soon_url: String,
}

impl CinelandSite {
    pub fn new(config: &CinelandConfig) -> Self {
        Self {
            coming_soon_url: config.coming_soon.clone(),
        }
    }

    /// The two listing pages share markup; only the URL says which one this is.
    fn is_coming_soon(&self, url: &str) -> bool {
        same_url(url, &self.coming_soon_url)
    }
}

#[async_trait::async_trait]
impl CinemaSite for CinelandSite {
    fn site(&self) -> SourceSite {
        SourceSite::Cineland
    }

    async fn fetch_listing(&self, fetcher: &HttpFetcher, url: &str) -> Result<Vec<Movie>> {
        let body = fetcher.page(url).await?;
        parse_listing(&body, !self.is_coming_soon(url))
    }

    async fn fetch_detail(&self, fetcher: &HttpFetcher, url: &str) -> Result<Option<Movie>> {
        let body = fetcher.page(url).await?;
        parse_detail(&body, url)
    }
}

pub fn parse_listing(html: &str, is_playing: bool) -> Result<Vec<Movie>> {
    let doc = Html::parse_document(html);
    let item_sel = selector("div.item")?;
    let link_sel = selector("figcaption a")?;
    let img_sel = selector("img.item__img")?;

    let mut movies = Vec::new();
    for item in doc.select(&item_sel) {
        let link = item.select(&link_sel).next();
        let title = link
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let href = link.and_then(|a| a.value().attr("href")).unwrap_or("");
        let poster = first_attr(item, &img_sel, &["data-src", "src"]).unwrap_or_default();

        debug!(%title, is_playing, "cineland listing item");
        movies.push(Movie::new(MovieBasicInfo::new(
            title,
            resolve_url(BASE, &poster),
            resolve_url(BASE, href),
            is_playing,
        )));
    }
    Ok(movies)
}

pub fn parse_detail(html: &str, url: &str) -> Result<Option<Movie>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title = first_text(root, &selector("h1")?).unwrap_or_default();
    let poster_url = first_attr(
        root,
        &selector("img[src*='poster'], img[src*='movie']")?,
        &["src"],
    )
    .map(|src| resolve_url(BASE, &src))
    .unwrap_or_default();

    // Metadata rows: first cell is the label, last cell the value.
    let row_sel = selector("table tr")?;
    let td_sel = selector("td")?;
    let strong_sel = selector("strong")?;
    let mut info: HashMap<String, String> = HashMap::new();
    let mut cast_text = String::new();
    for row in doc.select(&row_sel) {
        let cells: Vec<_> = row.select(&td_sel).collect();
        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            continue;
        };
        let key = element_text(*first);
        let key = key.trim_end_matches(':').trim().to_string();
        if !key.is_empty() {
            info.insert(key, element_text(*last));
        }
        if cast_text.is_empty()
            && row
                .select(&strong_sel)
                .any(|s| element_text(s).contains("Ηθοποιοί:"))
        {
            cast_text = cells.get(2).map(|c| element_text(*c)).unwrap_or_default();
        }
    }

    let rooms: Vec<String> = doc
        .select(&selector("div.aithouses span.cinema")?)
        .filter_map(|span| {
            span.value()
                .classes()
                .find(|c| c.starts_with("Cineland"))
                .map(|c| format!("{ROOM_MARKER} {}", c.trim_start_matches("Cineland")))
        })
        .collect();
    let projection_room = if rooms.is_empty() {
        "-".to_string()
    } else {
        rooms.join(", ")
    };

    let premiere_date = doc
        .select(&selector("div.release_date span")?)
        .last()
        .map(element_text)
        .unwrap_or_default();

    let description = first_text(root, &selector("div.ce_text.block p[style]")?).unwrap_or_default();
    let trailer_url = first_attr(
        root,
        &selector("div.ce_youtube iframe")?,
        &["data-src-cmplz", "src"],
    )
    .unwrap_or_default();

    let label_sel = selector("span.label")?;
    let value_sel = selector("span.value")?;
    let showtime: Vec<Showtime> = doc
        .select(&selector("div.ce_dma_eg_1 ul li.text, div.ce_dma_eg_2 ul li.text")?)
        .filter_map(|li| {
            let day = first_text(li, &label_sel)?;
            let time = first_text(li, &value_sel)?;
            Some(Showtime::new([day, time]))
        })
        .collect();

    let age_rating = first_text(root, &selector("div.rated span.rated-label")?)
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "-".to_string());

    let full = FullMovieInfo {
        title: title.clone(),
        poster_url: poster_url.clone(),
        duration: info.get("Διάρκεια").cloned().unwrap_or_else(|| "-".to_string()),
        genre: info.get("Είδος ταινίας").cloned().unwrap_or_default(),
        age_rating,
        projection_room,
        description,
        director: info.get("Σκηνοθεσία").cloned().unwrap_or_default(),
        cast: split_cast(&cast_text),
        trailer_url,
        showtime,
        premiere_date,
    };

    let basic = MovieBasicInfo::new(title, poster_url, url, true);
    Ok(accept_detail(basic, full, url))
}
