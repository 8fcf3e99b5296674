//! Syosetu sub-site selector.

use std::fmt;
use std::str::FromStr;

use feedgate_core::error::FeedError;
use url::form_urlencoded;

/// The site a search runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchSite {
    /// General site (`yomou`)
    General,
    /// Nocturne Novels, adult, male audience (`noc`)
    Nocturne,
    /// Moonlight Novels, adult, female and BL audience (`mnlt`)
    Moonlight,
    /// Midnight Novels, adult (`mid`)
    Midnight,
}

impl SearchSite {
    /// Path tag, also the site's subdomain.
    pub fn tag(&self) -> &'static str {
        match self {
            SearchSite::General => "yomou",
            SearchSite::Nocturne => "noc",
            SearchSite::Moonlight => "mnlt",
            SearchSite::Midnight => "mid",
        }
    }

    /// True for the adult sub-sites served by the R18 API.
    pub fn is_adult(&self) -> bool {
        !matches!(self, SearchSite::General)
    }

    /// `nocgenre` filter selecting this sub-site on the R18 API.
    pub fn nocgenre(&self) -> Option<&'static str> {
        match self {
            SearchSite::General => None,
            SearchSite::Nocturne => Some("1"),
            SearchSite::Moonlight => Some("2-3"),
            SearchSite::Midnight => Some("4"),
        }
    }

    /// Host that serves the novels themselves.
    pub fn novel_host(&self) -> &'static str {
        match self {
            SearchSite::General => "ncode.syosetu.com",
            _ => "novel18.syosetu.com",
        }
    }

    /// Human-facing search page for a query string.
    ///
    /// The query is re-encoded, so decoded input yields a valid URL.
    pub fn search_page_url(&self, query: &str) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form_urlencoded::parse(query.as_bytes()))
            .finish();
        format!("https://{}.syosetu.com/search/search/search.php?{}", self.tag(), encoded)
    }

    /// Link to a single novel.
    pub fn novel_url(&self, ncode: &str) -> String {
        format!("https://{}/{}/", self.novel_host(), ncode.to_lowercase())
    }
}

impl FromStr for SearchSite {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yomou" => Ok(SearchSite::General),
            "noc" => Ok(SearchSite::Nocturne),
            "mnlt" => Ok(SearchSite::Moonlight),
            "mid" => Ok(SearchSite::Midnight),
            other => Err(FeedError::invalid_parameter(
                "sub",
                format!("unknown site '{}', expected one of yomou, noc, mnlt, mid", other),
            )),
        }
    }
}

impl fmt::Display for SearchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
