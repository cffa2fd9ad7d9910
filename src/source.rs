use std::fmt;

use url::Url;

/// The theater chains this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSite {
    Cineland,
    Texnopolis,
    Odeon,
    Unknown,
}

impl SourceSite {
    pub const KNOWN: [SourceSite; 3] = [Self::Cineland, Self::Texnopolis, Self::Odeon];

    /// Registrable domain of the site, `None` for `Unknown`.
    pub fn domain(self) -> Option<&'static str> {
        match self {
            Self::Cineland => Some("cinelandpantelis.gr"),
            Self::Texnopolis => Some("texnopolis.net"),
            Self::Odeon => Some("odeon.gr"),
            Self::Unknown => None,
        }
    }

    /// Origin that relative links on the site are resolved against.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Cineland => "https://cinelandpantelis.gr/",
            Self::Texnopolis => "https://texnopolis.net/",
            Self::Odeon => "https://www.odeon.gr/",
            Self::Unknown => "",
        }
    }

    /// Classify a URL by its parsed host.
    ///
    /// Only the host counts: a known domain inside a path or query string does
    /// not route. Subdomains (`www.` included) of a known domain match.
    pub fn from_url(raw: &str) -> Self {
        let Ok(url) = Url::parse(raw.trim()) else {
            return Self::Unknown;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return Self::Unknown;
        }
        let Some(host) = url.host_str() else {
            return Self::Unknown;
        };
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|site| {
                site.domain().is_some_and(|d| {
                    host == d || host.strip_suffix(d).is_some_and(|rest| rest.ends_with('.'))
                })
            })
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for SourceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cineland => "Cineland Pantelis",
            Self::Texnopolis => "Texnopolis",
            Self::Odeon => "Odeon",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hosts_are_recognized() {
        assert_eq!(
            SourceSite::from_url("https://cinelandpantelis.gr/proballontai.html"),
            SourceSite::Cineland
        );
        assert_eq!(
            SourceSite::from_url("https://www.texnopolis.net/movies/dune/"),
            SourceSite::Texnopolis
        );
        assert_eq!(
            SourceSite::from_url("https://www.odeon.gr/tainies"),
            SourceSite::Odeon
        );
        assert_eq!(
            SourceSite::from_url("HTTPS://WWW.ODEON.GR/tainies"),
            SourceSite::Odeon
        );
    }

    #[test]
    fn domain_in_query_does_not_route() {
        assert_eq!(
            SourceSite::from_url("https://evil.example.com/?next=cinelandpantelis.gr"),
            SourceSite::Unknown
        );
        assert_eq!(
            SourceSite::from_url("https://example.com/texnopolis.net/page"),
            SourceSite::Unknown
        );
    }

    #[test]
    fn lookalike_hosts_are_unknown() {
        assert_eq!(
            SourceSite::from_url("https://notodeon.gr/"),
            SourceSite::Unknown
        );
        assert_eq!(
            SourceSite::from_url("https://odeon.gr.example.com/"),
            SourceSite::Unknown
        );
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(SourceSite::from_url(""), SourceSite::Unknown);
        assert_eq!(SourceSite::from_url("not a url"), SourceSite::Unknown);
        assert_eq!(
            SourceSite::from_url("ftp://cinelandpantelis.gr/x"),
            SourceSite::Unknown
        );
    }
}
