//! Texnopolis.
//! One page carries both the "now playing" slider and the "coming soon" section.
//! Film pages list metadata as labelled `<li>`s and group showtimes day → theater.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::movie::{FullMovieInfo, Movie, MovieBasicInfo, Showtime};
use crate::normalize::{
    element_text, first_attr, first_text, normalize_room_label, resolve_url, selector, split_cast,
    strip_label,
};
use crate::source::SourceSite;
use crate::{CinemaSite, accept_detail};

const BASE: &str = "https://texnopolis.net/";

const CURRENT_SECTION: &str = "section.currentMoviesSlider article.movieBox";
const UPCOMING_SECTION: &str = "section.comingSoon_container article.upcoming_movie";

pub struct TexnopolisSite;

impl TexnopolisSite {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TexnopolisSite {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CinemaSite for TexnopolisSite {
    fn site(&self) -> SourceSite {
        SourceSite::Texnopolis
    }

    async fn fetch_listing(&self, fetcher: &HttpFetcher, url: &str) -> Result<Vec<Movie>> {
        let body = fetcher.page(url).await?;
        parse_listing(&body)
    }

    async fn fetch_detail(&self, fetcher: &HttpFetcher, url: &str) -> Result<Option<Movie>> {
        let body = fetcher.page(url).await?;
        parse_detail(&body, url)
    }
}

/// Current movies first, then upcoming, each in page order.
pub fn parse_listing(html: &str) -> Result<Vec<Movie>> {
    let doc = Html::parse_document(html);
    let title_sel = selector("h3.movieTitle")?;
    let img_sel = selector("img.wp-post-image")?;
    let link_sel = selector("a[href]")?;

    let mut movies = Vec::new();
    for (section, is_playing) in [(CURRENT_SECTION, true), (UPCOMING_SECTION, false)] {
        let box_sel = selector(section)?;
        let before = movies.len();
        for article in doc.select(&box_sel) {
            movies.push(Movie::new(movie_box(
                article, &title_sel, &img_sel, &link_sel, is_playing,
            )));
        }
        debug!(section, count = movies.len() - before, "texnopolis section parsed");
    }
    Ok(movies)
}

fn movie_box(
    article: ElementRef<'_>,
    title_sel: &Selector,
    img_sel: &Selector,
    link_sel: &Selector,
    is_playing: bool,
) -> MovieBasicInfo {
    let title = first_text(article, title_sel)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let poster = first_attr(article, img_sel, &["data-src", "src"]).unwrap_or_default();
    let href = first_attr(article, link_sel, &["href"]).unwrap_or_default();

    MovieBasicInfo::new(
        title,
        resolve_url(BASE, &poster),
        resolve_url(BASE, &href),
        is_playing,
    )
}

pub fn parse_detail(html: &str, url: &str) -> Result<Option<Movie>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title = first_text(root, &selector("h1")?).unwrap_or_default();
    let poster_url = first_attr(root, &selector(".movie_poster img")?, &["data-src", "src"])
        .map(|src| resolve_url(BASE, &src))
        .unwrap_or_default();
    let projection_room = first_text(root, &selector(".playingTheaters")?).unwrap_or_default();
    let description = first_text(root, &selector(".movie_content > p")?).unwrap_or_default();

    let short_info: Vec<String> = doc
        .select(&selector(".movie_infoDetails__short li")?)
        .map(element_text)
        .collect();
    let genre = short_info.first().cloned().unwrap_or_default();
    let duration = short_info.get(1).cloned().unwrap_or_default();
    let age_rating = short_info
        .iter()
        .find(|t| t.contains("Καταλληλότητα"))
        .map(|t| strip_label(t, "Καταλληλότητα"))
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "-".to_string());

    let long_info: Vec<String> = doc
        .select(&selector(".movie_infoDetails__long li")?)
        .map(element_text)
        .collect();
    let labelled = |label: &str| {
        long_info
            .iter()
            .find(|t| t.contains(label))
            .map(|t| strip_label(t, label))
            .unwrap_or_default()
    };
    let director = labelled("Σκηνοθεσία:");
    let cast = split_cast(&labelled("Ηθοποιοί:"));

    let trailer_url = first_attr(
        root,
        &selector("div.movie_trailer iframe")?,
        &["data-src-cmplz", "src"],
    )
    .unwrap_or_default();

    let showtime = parse_showtimes(&doc)?;

    let full = FullMovieInfo {
        title: title.clone(),
        poster_url: poster_url.clone(),
        duration,
        genre,
        age_rating,
        projection_room,
        description,
        director,
        cast,
        trailer_url,
        showtime,
        premiere_date: String::new(),
    };

    let basic = MovieBasicInfo::new(title, poster_url, url, true);
    Ok(accept_detail(basic, full, url))
}

/// `[day, "t1, t2", theater]` per theater per day, in page order.
fn parse_showtimes(doc: &Html) -> Result<Vec<Showtime>> {
    let day_sel = selector("div.movieShows_day")?;
    let day_title_sel = selector("h3")?;
    let theater_sel = selector("div.movieShows_day_theater")?;
    let theater_title_sel = selector("h4")?;
    let slot_sel = selector("div.movieShows_showTimes span")?;

    let mut showtimes = Vec::new();
    for day_div in doc.select(&day_sel) {
        let Some(day) = first_text(day_div, &day_title_sel) else {
            continue;
        };
        for theater_div in day_div.select(&theater_sel) {
            let theater = first_text(theater_div, &theater_title_sel)
                .map(|t| normalize_room_label(&t))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "-".to_string());
            let times = theater_div
                .select(&slot_sel)
                .map(element_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            showtimes.push(Showtime::new([day.clone(), times, theater]));
        }
    }
    Ok(showtimes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::group_by_theater;

    const HOME: &str = r#"
<html><body>
<section class="currentMoviesSlider">
  <article class="movieBox">
    <a href="https://texnopolis.net/movie/furiosa/">
      <img class="wp-post-image" src="data:image/gif;base64,R0lGOD" data-src="https://texnopolis.net/wp-content/uploads/furiosa.jpg">
      <h3 class="movieTitle">Furiosa</h3>
    </a>
  </article>
  <article class="movieBox">
    <a href="/movie/garfield/"><h3 class="movieTitle">  Garfield  </h3></a>
  </article>
</section>
<section class="comingSoon_container">
  <article class="upcoming_movie">
    <a href="https://texnopolis.net/movie/alien-romulus/">
      <img class="wp-post-image" src="https://texnopolis.net/wp-content/uploads/alien.jpg">
      <h3 class="movieTitle">Alien: Romulus</h3>
    </a>
  </article>
</section>
</body></html>"#;

    const DETAIL: &str = r#"
<html><body>
<h1>Furiosa: A Mad Max Saga</h1>
<div class="movie_poster"><img data-src="/wp-content/uploads/furiosa-poster.jpg"></div>
<div class="playingTheaters">Αίθουσα 1, Αίθουσα 4</div>
<div class="movie_content"><p>Η νεαρή Furiosa απάγεται από την Πράσινη Χώρα.</p><div><p>not this</p></div></div>
<ul class="movie_infoDetails__short">
  <li>Περιπέτεια</li>
  <li>148'</li>
  <li>Καταλληλότητα: K15</li>
</ul>
<ul class="movie_infoDetails__long">
  <li>Σκηνοθεσία: George Miller</li>
  <li>Ηθοποιοί: Anya Taylor-Joy, Chris Hemsworth, Tom Burke</li>
</ul>
<div class="movie_trailer"><iframe data-src-cmplz="https://www.youtube.com/embed/xyz"></iframe></div>
<div class="movieShows_day">
  <h3>Πέμπτη 23/5</h3>
  <div class="movieShows_day_theater">
    <h4>Αίθουσα 1 Dolby Atmos</h4>
    <div class="movieShows_showTimes"><span>19:00</span><span> 22:00 </span></div>
  </div>
  <div class="movieShows_day_theater">
    <h4>Αίθουσα 4</h4>
    <div class="movieShows_showTimes"><span>20:30</span></div>
  </div>
</div>
<div class="movieShows_day">
  <h3>Παρασκευή 24/5</h3>
  <div class="movieShows_day_theater">
    <h4>Αίθουσα 1 (3D)</h4>
    <div class="movieShows_showTimes"><span>21:15</span></div>
  </div>
</div>
</body></html>"#;

    #[test]
    fn listing_sections_are_flagged_and_ordered() {
        let movies = parse_listing(HOME).unwrap();
        let titles: Vec<_> = movies.iter().map(|m| m.basic_info.title.as_str()).collect();
        assert_eq!(titles, vec!["Furiosa", "Garfield", "Alien: Romulus"]);
        assert!(movies[0].basic_info.is_playing);
        assert!(movies[1].basic_info.is_playing);
        assert!(!movies[2].basic_info.is_playing);
    }

    #[test]
    fn listing_prefers_lazy_poster_and_resolves_links() {
        let movies = parse_listing(HOME).unwrap();
        assert_eq!(
            movies[0].basic_info.poster_url,
            "https://texnopolis.net/wp-content/uploads/furiosa.jpg"
        );
        assert_eq!(movies[1].basic_info.poster_url, "");
        assert_eq!(
            movies[1].basic_info.detail_url,
            "https://texnopolis.net/movie/garfield/"
        );
        assert!(movies.iter().all(|m| m.basic_info.detail_url.starts_with("https://")));
    }

    #[test]
    fn detail_extracts_labelled_items() {
        let url = "https://texnopolis.net/movie/furiosa/";
        let movie = parse_detail(DETAIL, url).unwrap().unwrap();
        let info = movie.full_info().unwrap();
        assert_eq!(info.title, "Furiosa: A Mad Max Saga");
        assert_eq!(info.poster_url, "https://texnopolis.net/wp-content/uploads/furiosa-poster.jpg");
        assert_eq!(info.genre, "Περιπέτεια");
        assert_eq!(info.duration, "148'");
        assert_eq!(info.age_rating, "K15");
        assert_eq!(info.projection_room, "Αίθουσα 1, Αίθουσα 4");
        assert_eq!(info.description, "Η νεαρή Furiosa απάγεται από την Πράσινη Χώρα.");
        assert_eq!(info.director, "George Miller");
        assert_eq!(info.cast, vec!["Anya Taylor-Joy", "Chris Hemsworth", "Tom Burke"]);
        assert_eq!(info.trailer_url, "https://www.youtube.com/embed/xyz");
        assert_eq!(info.premiere_date, "");
    }

    #[test]
    fn showtimes_are_grouped_per_day_and_theater() {
        let movie = parse_detail(DETAIL, "https://texnopolis.net/movie/furiosa/")
            .unwrap()
            .unwrap();
        let st = &movie.full_info().unwrap().showtime;
        assert_eq!(
            st,
            &vec![
                Showtime::new(["Πέμπτη 23/5", "19:00, 22:00", "Αίθουσα 1"]),
                Showtime::new(["Πέμπτη 23/5", "20:30", "Αίθουσα 4"]),
                Showtime::new(["Παρασκευή 24/5", "21:15", "Αίθουσα 1"]),
            ]
        );

        let groups = group_by_theater(st);
        assert_eq!(groups[0].0, "Αίθουσα 1");
        let days: Vec<_> = groups[0].1.iter().map(Showtime::day).collect();
        assert_eq!(days, vec!["Πέμπτη 23/5", "Παρασκευή 24/5"]);
    }

    #[test]
    fn missing_rating_defaults_to_dash() {
        let html = r#"<html><body><h1>X</h1>
            <div class="movie_content"><p>Κάτι συμβαίνει.</p></div>
            <ul class="movie_infoDetails__short"><li>Δράμα</li></ul></body></html>"#;
        let movie = parse_detail(html, "https://texnopolis.net/movie/x/").unwrap().unwrap();
        let info = movie.full_info().unwrap();
        assert_eq!(info.age_rating, "-");
        assert_eq!(info.duration, "");
        assert!(info.cast.is_empty());
        assert!(info.showtime.is_empty());
    }

    #[test]
    fn page_without_content_is_rejected() {
        let html = "<html><body><h1>Furiosa</h1><div class=\"movieShows_day\"></div></body></html>";
        assert!(parse_detail(html, "https://texnopolis.net/movie/furiosa/").unwrap().is_none());
    }
}
