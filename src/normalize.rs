//! Text clean-up shared by the site adapters: trimming, URL resolution,
//! label stripping, cast splitting, age-rating codes and room labels.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::movie::Showtime;

/// Greek for "room"/"hall"; every site labels its screens with it.
pub const ROOM_MARKER: &str = "Αίθουσα";

static ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Αίθουσα\s*(\S+)").expect("room regex is valid"));

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

/// Collapse whitespace runs and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text below `el`, cleaned.
pub fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

/// Cleaned text of the first match of `sel` below `scope`.
pub fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(element_text)
}

/// First non-empty attribute among `attrs`, in order, on the first match of `sel`.
///
/// Lazy-load attributes go first so placeholders in `src` lose.
pub fn first_attr(scope: ElementRef<'_>, sel: &Selector, attrs: &[&str]) -> Option<String> {
    let el = scope.select(sel).next()?;
    attrs
        .iter()
        .filter_map(|a| el.value().attr(a))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve `href` against `base`. Empty input stays empty, absolute input is kept.
pub fn resolve_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(u) => u.to_string(),
        Err(_) => format!("{}/{}", base.trim_end_matches('/'), href.trim_start_matches('/')),
    }
}

/// Canonical form of a page URL, used as a lookup key.
///
/// Scheme and host are lowercased by the parser; the path keeps its case.
/// Surrounding whitespace and a trailing slash are dropped. Input that does
/// not parse is only trimmed.
pub fn url_key(url: &str) -> String {
    let url = url.trim();
    let canonical = match Url::parse(url) {
        Ok(u) => u.to_string(),
        Err(_) => url.to_string(),
    };
    canonical.trim_end_matches('/').to_string()
}

/// Whether two URLs name the same page, by their [`url_key`].
pub fn same_url(a: &str, b: &str) -> bool {
    url_key(a) == url_key(b)
}

/// Remove a label such as `Σκηνοθεσία:` and any surrounding colons/whitespace.
pub fn strip_label(text: &str, label: &str) -> String {
    let rest = match text.find(label) {
        Some(i) => &text[i + label.len()..],
        None => text,
    };
    clean_text(rest.trim_matches(|c: char| c == ':' || c.is_whitespace()))
}

/// Comma-separated names into an ordered list without blanks.
pub fn split_cast(text: &str) -> Vec<String> {
    text.split(',')
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Map Greek suitability prose onto the rating codes `K`, `K8`, `K12`, `K15`, `K18`.
///
/// Returns `-` when nothing recognizable is present.
pub fn age_rating_from_phrase(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("όλους") || lower.contains("ολους") {
        return "K".to_string();
    }
    // 18 before 8
    for age in ["18", "15", "12", "8"] {
        if lower.contains(age) {
            return format!("K{age}");
        }
    }
    "-".to_string()
}

/// Cut a theater label right after its room identifier.
///
/// `"Cineplex Αίθουσα 3 (Dolby Atmos)"` becomes `"Cineplex Αίθουσα 3"`. Labels
/// without the marker only get their whitespace cleaned.
pub fn normalize_room_label(label: &str) -> String {
    let label = clean_text(label);
    match ROOM_RE.captures(&label) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let prefix = label[..whole].trim();
            let room = &caps[1];
            if prefix.is_empty() {
                format!("{ROOM_MARKER} {room}")
            } else {
                format!("{prefix} {ROOM_MARKER} {room}")
            }
        }
        None => label,
    }
}

/// Group showtimes by theater, keeping first-seen key order and source order within a group.
///
/// Entries without a theater fall under `-`.
pub fn group_by_theater(showtimes: &[Showtime]) -> Vec<(String, Vec<Showtime>)> {
    let mut groups: Vec<(String, Vec<Showtime>)> = Vec::new();
    for st in showtimes {
        let key = st.theater().unwrap_or("-");
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, items)) => items.push(st.clone()),
            None => groups.push((key.to_string(), vec![st.clone()])),
        }
    }
    groups
}
