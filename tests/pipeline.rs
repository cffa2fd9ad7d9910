use cinema_showtimes::normalize::group_by_theater;
use cinema_showtimes::{DetailState, MovieCache, SourceSite, cineland, odeon, texnopolis};

const CINELAND_NOW: &str = r#"
<html><body>
  <div class="item">
    <img class="item__img" data-src="files/posters/kinds.jpg" src="files/blank.gif">
    <figcaption><a href="kinds-of-kindness.html">Kinds of Kindness</a></figcaption>
  </div>
  <div class="item">
    <figcaption><a href="the-substance.html">The Substance</a></figcaption>
  </div>
</body></html>"#;

const CINELAND_DETAIL: &str = r#"
<html><body>
  <h1>  Kinds   of Kindness </h1>
  <table>
    <tr><td>Σκηνοθεσία:</td><td>Γιώργος Λάνθιμος</td></tr>
    <tr><td><strong>Ηθοποιοί:</strong></td><td></td><td>Emma Stone, Jesse Plemons, Willem Dafoe</td></tr>
  </table>
  <div class="ce_text block"><p style="margin:0">Τρεις ιστορίες.</p></div>
</body></html>"#;

const TEXNOPOLIS_HOME: &str = r#"
<html><body>
<section class="currentMoviesSlider">
  <article class="movieBox"><a href="https://texnopolis.net/movie/a/"><h3 class="movieTitle">A</h3></a></article>
</section>
<section class="comingSoon_container">
  <article class="upcoming_movie"><a href="https://texnopolis.net/movie/b/"><h3 class="movieTitle">B</h3></a></article>
  <article class="upcoming_movie"><a href="https://texnopolis.net/movie/c/"><h3 class="movieTitle">C</h3></a></article>
</section>
</body></html>"#;

const ODEON_CATALOGUE: &str = r#"
<html><body>
<section class="catalogue catalogue--current">
  <div class="movie-card">
    <h2 class="movie-card__title"><a href="/tainia/anora/">Anora</a></h2>
    <ul class="movie-card__sessions">
      <li><span class="session-day">Πέμπτη</span><span class="session-time">19:00</span><span class="session-hall">Αίθουσα 1</span></li>
      <li><span class="session-day">Πέμπτη</span><span class="session-time">21:00</span><span class="session-hall">Αίθουσα 3</span></li>
      <li><span class="session-day">Παρασκευή</span><span class="session-time">22:00</span><span class="session-hall">Αίθουσα 1</span></li>
    </ul>
  </div>
</section>
</body></html>"#;

const ODEON_DETAIL: &str = r#"
<html><body>
  <h1 class="movie-details__title">Anora</h1>
  <ul class="movie-details__meta"><li>Σκηνοθεσία: Sean Baker</li></ul>
  <div class="movie-details__rating">Ακατάλληλο για κάτω των 18</div>
</body></html>"#;

#[test]
fn listing_with_missing_poster_keeps_both_items() {
    let movies = cineland::parse_listing(CINELAND_NOW, true).unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(
        movies[0].basic_info.poster_url,
        "https://cinelandpantelis.gr/files/posters/kinds.jpg"
    );
    assert_eq!(movies[1].basic_info.poster_url, "");
}

#[test]
fn listing_urls_are_absolute_and_routable() {
    let mut all = cineland::parse_listing(CINELAND_NOW, true).unwrap();
    all.extend(texnopolis::parse_listing(TEXNOPOLIS_HOME).unwrap());
    all.extend(odeon::parse_listing(ODEON_CATALOGUE).unwrap());

    for movie in &all {
        let url = movie.detail_url();
        assert!(url.starts_with("https://"), "{url} is not absolute");
        assert_ne!(SourceSite::from_url(url), SourceSite::Unknown);
    }
}

#[test]
fn listing_then_detail_merges_into_cache() {
    let mut cache = MovieCache::new();
    cache.replace_listing(cineland::parse_listing(CINELAND_NOW, true).unwrap());

    let url = "https://cinelandpantelis.gr/kinds-of-kindness.html";
    let listed_title = cache.get(url).unwrap().basic_info.title.clone();

    let detailed = cineland::parse_detail(CINELAND_DETAIL, url).unwrap().unwrap();
    assert_eq!(detailed.basic_info.title, listed_title);
    assert!(cache.apply_detail(detailed));

    let merged = cache.get(url).unwrap();
    let info = merged.full_info().unwrap();
    assert_eq!(info.director, "Γιώργος Λάνθιμος");
    assert_eq!(info.cast, vec!["Emma Stone", "Jesse Plemons", "Willem Dafoe"]);
    assert!(merged.basic_info.is_playing);
    // the listing poster survives a detail page without one
    assert_eq!(
        merged.basic_info.poster_url,
        "https://cinelandpantelis.gr/files/posters/kinds.jpg"
    );

    let other = cache
        .get("https://cinelandpantelis.gr/the-substance.html")
        .unwrap();
    assert_eq!(other.detail, DetailState::NotFetched);
}

#[test]
fn failed_detail_does_not_erase_earlier_one() {
    let mut cache = MovieCache::new();
    cache.replace_listing(cineland::parse_listing(CINELAND_NOW, true).unwrap());
    let url = "https://cinelandpantelis.gr/kinds-of-kindness.html";
    cache.apply_detail(cineland::parse_detail(CINELAND_DETAIL, url).unwrap().unwrap());

    let empty = cineland::parse_detail("<html><body><h1>x</h1></body></html>", url).unwrap();
    assert!(empty.is_none());
    cache.mark_failed(url);
    assert!(cache.get(url).unwrap().full_info().is_some());
}

#[test]
fn texnopolis_tabs() {
    let mut cache = MovieCache::new();
    cache.replace_listing(texnopolis::parse_listing(TEXNOPOLIS_HOME).unwrap());
    let now: Vec<_> = cache.now_playing().iter().map(|m| m.basic_info.title.clone()).collect();
    let soon: Vec<_> = cache.coming_soon().iter().map(|m| m.basic_info.title.clone()).collect();
    assert_eq!(now, vec!["A"]);
    assert_eq!(soon, vec!["B", "C"]);
}

#[test]
fn odeon_detail_cross_references_catalogue() {
    let catalogue = odeon::parse_listing(ODEON_CATALOGUE).unwrap();
    let url = "https://www.odeon.gr/tainia/anora/";
    let entry = odeon::find_entry(&catalogue, url);
    let movie = odeon::parse_detail(ODEON_DETAIL, url, entry).unwrap().unwrap();

    let info = movie.full_info().unwrap();
    assert_eq!(info.age_rating, "K18");
    assert_eq!(info.projection_room, "Αίθουσα 1, Αίθουσα 3");

    let groups = group_by_theater(&info.showtime);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Αίθουσα 1");
    let days: Vec<_> = groups[0].1.iter().map(|s| s.day().to_string()).collect();
    assert_eq!(days, vec!["Πέμπτη", "Παρασκευή"]);
}
